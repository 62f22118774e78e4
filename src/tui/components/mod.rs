//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: Top status line with progress and owner status
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `OtpInput`: The segmented code input. Holds focus and selection state,
//!   takes the code as a prop and emits `OtpEvent::Changed`.
//!
//! ### Co-location of Concerns
//!
//! Each component file contains everything related to that component:
//! state types, event types, rendering, event handling and tests.
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data as props, never by reaching into the
//! application state:
//!
//! ```rust,ignore
//! tui.otp.value = app.code.clone();
//! tui.otp.render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status line)
//! └── otp/             (Segmented code input)
//!     ├── mod.rs       (widget, events, focus routing)
//!     ├── cells.rs     (memoized cell derivation)
//!     └── edit.rs      (per-cell text editing)
//! ```

pub mod otp;
pub use otp::{OtpEvent, OtpInput};

mod title_bar;
pub use title_bar::TitleBar;
