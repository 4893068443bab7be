use crate::{browser::config::{ConnectionOptions, LaunchOptions},
            dom::PageSnapshot,
            error::{AssistantError, Result},
            selection::Overlay};
use headless_chrome::{Browser, Tab};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Browser session that owns the Chrome/Chromium instance the assistant works in
pub struct BrowserSession {
    browser: Browser,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // Interactive selections can take a while; the default idle timeout is 30 seconds
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.path = options.chrome_path;
        launch_opts.user_data_dir = options.user_data_dir;
        launch_opts.sandbox = options.sandbox;

        let browser = Browser::new(launch_opts).map_err(|e| AssistantError::LaunchFailed(e.to_string()))?;

        browser.new_tab().map_err(|e| AssistantError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        log::info!("Browser launched (headless: {})", options.headless);
        Ok(Self { browser })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect_with_timeout(options.ws_url, Duration::from_millis(options.timeout))
            .map_err(|e| AssistantError::ConnectionFailed(e.to_string()))?;

        Ok(Self { browser })
    }

    /// Get the active tab
    pub fn tab(&self) -> Result<Arc<Tab>> {
        self.get_active_tab()
    }

    /// Get all tabs
    pub fn get_tabs(&self) -> Result<Vec<Arc<Tab>>> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| AssistantError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .clone();

        Ok(tabs)
    }

    /// Get the currently active tab by checking the document visibility and focus state
    pub fn get_active_tab(&self) -> Result<Arc<Tab>> {
        let tabs = self.get_tabs()?;

        for probe in [
            "document.visibilityState === 'visible' && document.hasFocus()",
            "document.visibilityState === 'visible'",
        ] {
            for tab in &tabs {
                match tab.evaluate(probe, false) {
                    Ok(remote_object) => {
                        if remote_object.value.and_then(|v| v.as_bool()).unwrap_or(false) {
                            return Ok(tab.clone());
                        }
                    }
                    Err(e) => log::debug!("Failed to check tab status: {}", e),
                }
            }
        }

        tabs.into_iter()
            .next()
            .ok_or_else(|| AssistantError::TabOperationFailed("No active tab found".to_string()))
    }

    /// Navigate the active tab and wait for the page to load
    pub fn open(&self, url: &str) -> Result<Arc<Tab>> {
        self.navigate(url)?;
        self.wait_for_navigation()?;
        self.tab()
    }

    /// Navigate to a URL using the active tab
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab()?
            .navigate_to(url)
            .map_err(|e| AssistantError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        Ok(())
    }

    /// Wait for navigation to complete
    pub fn wait_for_navigation(&self) -> Result<()> {
        self.tab()?
            .wait_until_navigated()
            .map_err(|e| AssistantError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Read a layout snapshot of the active tab
    pub fn snapshot(&self) -> Result<PageSnapshot> {
        PageSnapshot::from_tab(&self.tab()?)
    }

    /// Install the selection overlay in the active tab
    pub fn start_overlay(&self) -> Result<Overlay> {
        Overlay::install(self.tab()?)
    }
}
