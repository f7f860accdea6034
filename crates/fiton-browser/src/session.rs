use crate::launcher::{ChromeLauncher, LaunchOptions};
use crate::{ChromeFinder, ChromePage, Error, ProfileManager, Result};
use chromiumoxide::browser::Browser;
use chromiumoxide::handler::Handler;
use futures::StreamExt;
use std::path::PathBuf;
use std::process::Child;
use std::time::Duration;
use tokio::task::JoinHandle;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(500);
const EXIT_GRACE_PERIOD: Duration = Duration::from_secs(2);

/// Where Chrome comes from and how it is started
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub chrome_path: Option<PathBuf>,
    /// Named persistent profile; a temporary profile is used when `None`
    pub profile: Option<String>,
    pub launch: LaunchOptions,
}

/// Chrome child process, killed when dropped unless it already exited
struct ChromeProcess {
    child: Child,
}

impl ChromeProcess {
    /// Give Chrome a moment to exit on its own, then kill it
    async fn shutdown(&mut self) {
        let deadline = tokio::time::Instant::now() + EXIT_GRACE_PERIOD;
        while tokio::time::Instant::now() < deadline {
            match self.child.try_wait() {
                Ok(Some(status)) => {
                    tracing::debug!("Chrome exited ({})", status);
                    return;
                }
                Ok(None) => tokio::time::sleep(Duration::from_millis(100)).await,
                Err(e) => {
                    tracing::debug!("Could not poll Chrome process: {}", e);
                    break;
                }
            }
        }
        self.kill();
    }

    fn kill(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            tracing::debug!("Killing Chrome (pid {})", self.child.id());
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

impl Drop for ChromeProcess {
    fn drop(&mut self) {
        self.kill();
    }
}

/// One browser for a whole run: the launched Chrome, its CDP connection and a page
///
/// Chrome is terminated by [`BrowserSession::close`], or on drop if a run
/// bails out before reaching it.
pub struct BrowserSession {
    browser: Browser,
    page: ChromePage,
    handler_task: JoinHandle<()>,
    // Field order matters: Chrome must be gone before its profile is removed
    chrome: ChromeProcess,
    _profile: ProfileManager,
}

impl BrowserSession {
    /// Locate and launch Chrome, then attach to it over CDP
    pub async fn start(options: SessionOptions) -> Result<Self> {
        let chrome_binary = ChromeFinder::new(options.chrome_path).find()?;
        tracing::info!("Found Chrome at: {}", chrome_binary.display());

        let profile = match options.profile {
            Some(name) => {
                let profile = ProfileManager::named(&name)?;
                tracing::info!("Using profile: {}", profile.path().display());
                profile
            }
            None => {
                tracing::debug!("Using temporary profile");
                ProfileManager::temporary()?
            }
        };

        let launcher = ChromeLauncher::new(
            chrome_binary,
            profile.path().to_path_buf(),
            options.launch,
        );
        let debugging_port = launcher.debugging_port();

        let chrome = ChromeProcess {
            child: launcher.launch()?,
        };
        tracing::info!("Chrome started (pid {})", chrome.child.id());

        // From here on, an early return drops `chrome` and kills the process
        let (browser, handler) = connect(debugging_port).await?;
        let handler_task = spawn_handler(handler);

        let page = match first_page(&browser).await {
            Ok(page) => page,
            Err(e) => {
                handler_task.abort();
                return Err(e);
            }
        };

        Ok(Self {
            browser,
            page: ChromePage::new(page),
            handler_task,
            chrome,
            _profile: profile,
        })
    }

    pub fn page(&self) -> &ChromePage {
        &self.page
    }

    /// Close the browser and wait for Chrome to exit
    pub async fn close(mut self) -> Result<()> {
        tracing::debug!("Closing browser session");

        let result = self.browser.close().await.map(|_| ()).map_err(Error::from);
        if let Err(e) = &result {
            tracing::debug!("Browser.close failed, killing Chrome: {}", e);
        }

        self.chrome.shutdown().await;
        self.handler_task.abort();
        result
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}

/// Connect to Chrome via CDP with retries (Chrome may not be fully ready)
async fn connect(debugging_port: u16) -> Result<(Browser, Handler)> {
    let url = format!("http://localhost:{}", debugging_port);
    let mut attempts_left = CONNECT_ATTEMPTS;

    loop {
        tracing::debug!("Attempting CDP connection to {}...", url);
        match Browser::connect(&url).await {
            Ok(connected) => {
                tracing::info!("CDP connection established");
                return Ok(connected);
            }
            Err(e) => {
                attempts_left -= 1;
                if attempts_left == 0 {
                    return Err(Error::Cdp(format!(
                        "Failed to connect to Chrome after {} attempts: {}",
                        CONNECT_ATTEMPTS, e
                    )));
                }
                tracing::debug!(
                    "CDP connection attempt failed, retrying... ({} left)",
                    attempts_left
                );
                tokio::time::sleep(CONNECT_RETRY_DELAY).await;
            }
        }
    }
}

/// The handler must be polled for any CDP command to complete
fn spawn_handler(mut handler: Handler) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                // Some CDP events are not fully parseable; keep going
                tracing::debug!("CDP handler event error (continuing): {}", e);
            }
        }
    })
}

async fn first_page(browser: &Browser) -> Result<chromiumoxide::Page> {
    // Give Chrome a moment to create its initial tab
    tokio::time::sleep(CONNECT_RETRY_DELAY).await;

    if let Some(page) = browser.pages().await?.into_iter().next() {
        tracing::debug!("Using existing page");
        return Ok(page);
    }

    tracing::debug!("No existing pages, creating new page");
    Ok(browser.new_page("about:blank").await?)
}
