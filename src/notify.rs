use compact_str::{CompactString, format_compact};
use reqwest::{Client, Url};
use serde::Serialize;

use crate::{calendar::month_name, dates::ReservationDate};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub resort: CompactString,
    pub month: &'static str,
    pub day: u8,
    pub year: i32,
}

impl Alert {
    pub fn subject(&self) -> CompactString {
        format_compact!("Ikon reservation open: {} {} {}", self.resort, self.month, self.day)
    }

    pub fn body(&self) -> String {
        format!(
            "A reservation just opened up at {} on {} {}, {}.\n\nBook it at https://account.ikonpass.com/en/myaccount/add-reservations/\n",
            self.resort, self.month, self.day, self.year
        )
    }
}

impl From<&ReservationDate> for Alert {
    fn from(date: &ReservationDate) -> Self {
        Self {
            resort: date.resort.clone(),
            month: month_name(date.month).unwrap_or("?"),
            day: date.day,
            year: date.year,
        }
    }
}

pub trait Notifier {
    async fn send(&self, recipient: &str, alert: &Alert) -> anyhow::Result<()>;
}

pub struct MailApi {
    client: Client,
    endpoint: Url,
    token: Option<String>,
    from: String,
}

impl MailApi {
    pub fn new(endpoint: Url, token: Option<String>, from: String) -> reqwest::Result<Self> {
        let client = Client::builder()
            .connect_timeout(const { core::time::Duration::from_secs(8) })
            .build()?;
        Ok(Self {
            client,
            endpoint,
            token,
            from,
        })
    }
}

#[derive(Serialize)]
struct Payload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
    alert: &'a Alert,
}

impl Notifier for MailApi {
    async fn send(&self, recipient: &str, alert: &Alert) -> anyhow::Result<()> {
        let subject = alert.subject();
        let text = alert.body();
        let payload = Payload {
            from: &self.from,
            to: recipient,
            subject: &subject,
            text: &text,
            alert,
        };

        let mut request = self.client.post(self.endpoint.clone()).json(&payload);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request.send().await?.error_for_status()?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LogOnly;

impl Notifier for LogOnly {
    async fn send(&self, recipient: &str, alert: &Alert) -> anyhow::Result<()> {
        tracing::warn!(target: "notify", "(not sent) to {recipient}: {}", alert.subject());
        Ok(())
    }
}

pub enum Transport {
    Http(MailApi),
    Log(LogOnly),
}

impl Notifier for Transport {
    async fn send(&self, recipient: &str, alert: &Alert) -> anyhow::Result<()> {
        match self {
            Self::Http(api) => api.send(recipient, alert).await,
            Self::Log(sink) => sink.send(recipient, alert).await,
        }
    }
}

pub async fn notify_opened<N: Notifier>(
    notifier: &N,
    recipients: &[CompactString],
    date: &ReservationDate,
) -> usize {
    let alert = Alert::from(date);
    let mut sent = 0;

    for recipient in recipients {
        match notifier.send(recipient, &alert).await {
            Ok(()) => {
                tracing::info!(target: "notify", "\x1b[36malerted\x1b[0m {recipient}: {date}");
                sent += 1;
            }
            Err(e) => {
                tracing::error!(target: "notify", "\x1b[31malert to {recipient} failed\x1b[0m ({date}): {e:?}");
            }
        }
    }

    sent
}
