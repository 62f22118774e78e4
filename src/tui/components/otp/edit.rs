//! Platform-level editing of a single cell.
//!
//! A text field applies keystrokes to its own content before the widget sees
//! it; the widget then validates the resulting raw text. `compose` plays the
//! part of that text field: it produces the raw content a cell would hold
//! after one edit, given whether the whole content was selected.

/// One edit applied to a cell's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Typed character or pasted text.
    Insert(String),
    /// Backspace.
    DeleteBackward,
    /// Delete.
    DeleteForward,
}

/// Raw cell content after applying `edit` to `content`.
///
/// With the content selected an insert replaces it and either deletion
/// clears it. Without a selection the caret sits at the end: inserts
/// append, Backspace drops the last character, Delete does nothing.
pub fn compose(content: &str, selected: bool, edit: &Edit) -> String {
    match (edit, selected) {
        (Edit::Insert(text), true) => text.clone(),
        (Edit::Insert(text), false) => format!("{content}{text}"),
        (Edit::DeleteBackward | Edit::DeleteForward, true) => String::new(),
        (Edit::DeleteBackward, false) => {
            let mut chars = content.chars();
            chars.next_back();
            chars.as_str().to_string()
        }
        (Edit::DeleteForward, false) => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_content_is_replaced() {
        assert_eq!(compose("5", true, &Edit::Insert("7".into())), "7");
        assert_eq!(compose("5", true, &Edit::DeleteBackward), "");
        assert_eq!(compose("5", true, &Edit::DeleteForward), "");
    }

    #[test]
    fn test_caret_at_end() {
        assert_eq!(compose("5", false, &Edit::Insert("78".into())), "578");
        assert_eq!(compose("5", false, &Edit::DeleteBackward), "");
        assert_eq!(compose("5", false, &Edit::DeleteForward), "5");
        assert_eq!(compose("", false, &Edit::DeleteBackward), "");
    }
}
