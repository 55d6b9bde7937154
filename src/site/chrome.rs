use core::time::Duration;
use std::{borrow::Cow, ffi::OsStr, sync::Arc};

use headless_chrome::{Browser, Element, LaunchOptions, Tab, browser::tab::NoElementFound};
use rand::seq::IndexedRandom;
use serde_json::Value;
use tokio::{
    task::spawn_blocking,
    time::{Instant, sleep},
};

use super::{ReservationSite, Selectors};
use crate::error::{StepError, StepResult};

#[rustfmt::skip]
pub const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.0.0",
];

pub fn launch(headless: bool, proxy: Option<&str>) -> anyhow::Result<Browser> {
    Browser::new(LaunchOptions {
        args: vec![OsStr::new("--disable-blink-features=AutomationControlled")],
        headless,
        proxy_server: proxy,
        // Must outlast the pause between scan cycles.
        idle_browser_timeout: const { Duration::from_secs(600) },
        ..LaunchOptions::default()
    })
}

#[allow(clippy::significant_drop_tightening)]
fn first_tab(browser: &Browser) -> anyhow::Result<Arc<Tab>> {
    let tab = browser.new_tab()?;

    {
        let tabs_guard = browser
            .get_tabs()
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        for remain in &*tabs_guard {
            if !Arc::ptr_eq(&tab, remain) {
                remain.close(true)?;
            }
        }
    }

    Ok(tab)
}

fn js_click(element: &Element<'_>) -> anyhow::Result<()> {
    // The site swallows synthetic mouse events; a DOM click goes through.
    element.call_js_fn("function(){this.click()}", Vec::new(), false)?;
    Ok(())
}

fn inner_html(element: &Element<'_>) -> anyhow::Result<String> {
    let ret = element.call_js_fn("function(){return this.innerHTML}", Vec::new(), false)?;

    match ret.value {
        Some(Value::String(s)) => Ok(s),
        Some(value) => anyhow::bail!("not a string: {value}"),
        None => anyhow::bail!("returned nothing"),
    }
}

pub struct ChromeSite {
    tab: Arc<Tab>,
    selectors: Selectors,
}

impl ChromeSite {
    pub fn new(browser: &Browser, selectors: Selectors) -> anyhow::Result<Self> {
        let tab = first_tab(browser)?;

        let user_agent = *USER_AGENTS
            .choose(&mut rand::rng())
            .ok_or_else(|| anyhow::anyhow!("no UA available"))?;
        tracing::info!(target: "browser", "choosing user-agent \x1b[1;36m{user_agent}\x1b[0m ...");
        tab.set_user_agent(user_agent, None, None)?;

        Ok(Self { tab, selectors })
    }

    async fn blocking<T, F>(&self, f: F) -> anyhow::Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Tab) -> anyhow::Result<T> + Send + 'static,
    {
        let tab = Arc::clone(&self.tab);

        spawn_blocking(move || f(&tab)).await?
    }

    async fn goto(&self, url: &'static str) -> StepResult<()> {
        tracing::debug!(target: "browser", "navigating to {url}");
        self.blocking(move |tab| {
            tab.navigate_to(url)?.wait_until_navigated()?;
            Ok(())
        })
        .await
        .map_err(Into::into)
    }

    async fn wait_for<T, F>(
        &self,
        what: impl Into<Cow<'static, str>>,
        xpath: String,
        read: F,
    ) -> StepResult<T>
    where
        T: Send + 'static,
        F: Fn(&Element<'_>) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        const PERIOD: Duration = Duration::from_millis(1832 / 4);

        let limit = self.selectors.wait;
        let deadline = Instant::now() + limit;
        let xpath: Arc<str> = xpath.into();
        let read = Arc::new(read);

        loop {
            let (xpath, read) = (Arc::clone(&xpath), Arc::clone(&read));
            let found = self
                .blocking(move |tab| match tab.find_element_by_xpath(&xpath) {
                    Ok(element) => read(&element).map(Some),
                    Err(err) => {
                        if !err.is::<NoElementFound>() {
                            tracing::debug!(target: "browser", "{xpath}: {err}");
                        }
                        Ok(None)
                    }
                })
                .await?;

            if let Some(value) = found {
                break Ok(value);
            }
            if Instant::now() >= deadline {
                break Err(StepError::Timeout {
                    what: what.into(),
                    limit,
                });
            }

            sleep(PERIOD).await;
        }
    }
}

impl ReservationSite for ChromeSite {
    fn selectors(&self) -> &Selectors {
        &self.selectors
    }

    async fn login(&mut self, email: &str, password: &str) -> StepResult<()> {
        let s = self.selectors;
        self.goto(s.login_url).await?;

        let email = email.to_owned();
        self.wait_for("email field", s.email_input.to_owned(), move |e| {
            e.type_into(&email)?;
            Ok(())
        })
        .await?;

        let password = password.to_owned();
        self.wait_for("password field", s.password_input.to_owned(), move |e| {
            e.type_into(&password)?;
            e.parent.press_key("Enter")?;
            Ok(())
        })
        .await?;

        self.wait_for("\"Make a Reservation\"", s.make_reservation.to_owned(), js_click)
            .await
    }

    async fn open_reservations(&mut self) -> StepResult<()> {
        self.goto(self.selectors.reservations_url).await
    }

    async fn select_resort(&mut self, resort: &str) -> StepResult<()> {
        let s = self.selectors;
        self.wait_for(format!("resort {resort:?}"), s.resort_option(resort), js_click)
            .await?;
        self.wait_for("\"Continue\"", s.continue_button.to_owned(), js_click)
            .await
    }

    async fn month_label(&mut self) -> StepResult<String> {
        self.wait_for("month label", self.selectors.month_label.to_owned(), inner_html)
            .await
    }

    async fn next_month(&mut self) -> StepResult<()> {
        self.wait_for("next month button", self.selectors.next_month.to_owned(), js_click)
            .await
    }

    async fn day_class(&mut self, day_label: &str) -> StepResult<String> {
        self.wait_for(
            format!("day {day_label:?}"),
            self.selectors.day_cell(day_label),
            |e| Ok(e.get_attribute_value("class")?.unwrap_or_default()),
        )
        .await
    }
}
