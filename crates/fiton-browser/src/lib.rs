//! Chrome DevTools Protocol driver for FITON end-to-end scenarios.
//!
//! [`BrowserSession`] finds and launches Chrome, attaches over CDP and hands
//! out a [`ChromePage`] implementing [`fiton_core::Page`].

mod chrome_finder;
mod error;
mod launcher;
mod page;
mod profile;
mod session;

pub use chrome_finder::ChromeFinder;
pub use error::{Error, Result};
pub use launcher::{ChromeLauncher, DEFAULT_DEBUGGING_PORT, LaunchOptions};
pub use page::{ChromeElement, ChromePage};
pub use profile::ProfileManager;
pub use session::{BrowserSession, SessionOptions};
