use crate::{Error, Result};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

pub const DEFAULT_DEBUGGING_PORT: u16 = 9222;

/// Chrome command-line switches for a run
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub debugging_port: u16,
    pub headless: bool,
    pub maximized: bool,
    /// Accept self-signed certificates such as a local dev server's
    pub ignore_certificate_errors: bool,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            debugging_port: DEFAULT_DEBUGGING_PORT,
            headless: false,
            maximized: true,
            ignore_certificate_errors: false,
        }
    }
}

/// Manages Chrome process lifecycle
pub struct ChromeLauncher {
    chrome_path: PathBuf,
    profile_path: PathBuf,
    options: LaunchOptions,
}

impl ChromeLauncher {
    pub fn new(chrome_path: PathBuf, profile_path: PathBuf, options: LaunchOptions) -> Self {
        Self {
            chrome_path,
            profile_path,
            options,
        }
    }

    /// Launch Chrome process
    pub fn launch(&self) -> Result<Child> {
        let args = self.build_args();
        tracing::debug!("Launching {} {}", self.chrome_path.display(), args.join(" "));

        Command::new(&self.chrome_path)
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::Browser(format!("Failed to launch Chrome: {}", e)))
    }

    /// Build Chrome command-line arguments
    fn build_args(&self) -> Vec<String> {
        let mut args = vec![
            format!("--remote-debugging-port={}", self.options.debugging_port),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            format!("--user-data-dir={}", self.profile_path.display()),
        ];

        if self.options.headless {
            args.push("--headless=new".to_string());
        }
        if self.options.maximized {
            args.push("--start-maximized".to_string());
        }
        if self.options.ignore_certificate_errors {
            args.push("--ignore-certificate-errors".to_string());
        }

        args.push("about:blank".to_string());
        args
    }

    pub fn debugging_port(&self) -> u16 {
        self.options.debugging_port
    }
}
