use compact_str::CompactString;
use ikw::{
    dates::AvailableDates,
    error::StepResult,
    navigate,
    notify::{LogOnly, MailApi, Notifier, Transport},
    plan::WatchPlan,
    scan,
    site::{ChromeSite, ReservationSite, Selectors},
};

mod constants {
    use core::time::Duration;

    macro_rules! env_or_default {
        ($name:literal, $default:expr) => {
            if let Some(s) = option_env!($name) {
                s
            } else {
                $default
            }
        };
    }

    pub const LOGIN_EMAIL: &str = env_or_default!("IKON_LOGIN_EMAIL", "watcher@example.com");
    pub const RECIPIENTS: [&str; 2] = [
        env_or_default!("IKON_NOTIFY_1", "watcher@example.com"),
        env_or_default!("IKON_NOTIFY_2", "friend@example.com"),
    ];
    pub const MAIL_FROM: &str = env_or_default!("IKON_MAIL_FROM", "ikon-watcher@example.com");
    pub const CYCLE_PAUSE: Duration = Duration::from_secs(60);
}

#[derive(clap::Parser)]
#[command(about = "Watches the Ikon reservation calendar and mails alerts when dates open up")]
struct Args {
    #[arg(help = "account password, prompted for when omitted")]
    password: Option<String>,
    #[arg(long, env = "IKON_EMAIL", default_value = constants::LOGIN_EMAIL)]
    email: String,
    #[arg(long = "notify", value_name = "address", default_values = constants::RECIPIENTS)]
    recipients: Vec<CompactString>,
    #[arg(long, env = "MAIL_API_URL", value_name = "url")]
    mail_api: Option<reqwest::Url>,
    #[arg(long, env = "MAIL_API_TOKEN", hide_env_values = true)]
    mail_token: Option<String>,
    #[arg(long, env = "MAIL_FROM", default_value = constants::MAIL_FROM)]
    mail_from: String,
    #[arg(long)]
    headed: bool,
    #[arg(long, value_name = "url")]
    proxy: Option<String>,
}

impl Args {
    fn transport(&mut self) -> anyhow::Result<Transport> {
        Ok(match self.mail_api.take() {
            Some(endpoint) => {
                tracing::info!("mailing alerts through \x1b[36m{endpoint}\x1b[0m");
                Transport::Http(MailApi::new(
                    endpoint,
                    self.mail_token.take(),
                    core::mem::take(&mut self.mail_from),
                )?)
            }
            None => {
                tracing::warn!("no mail relay configured, alerts will only be logged");
                Transport::Log(LogOnly)
            }
        })
    }
}

async fn watch<S: ReservationSite, N: Notifier>(
    site: &mut S,
    notifier: &N,
    args: &Args,
    password: &str,
) -> StepResult<()> {
    let plan = WatchPlan::default();
    let mut dates = AvailableDates::new();

    navigate::login(site, &args.email, password).await?;
    scan::full_scan(site, &plan, &mut dates).await?;

    loop {
        tokio::time::sleep(constants::CYCLE_PAUSE).await;
        scan::delta_scan(site, &plan, &mut dates, notifier, &args.recipients).await?;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use clap::Parser;

    pretty_env_logger::init_timed();

    let mut args = Args::parse();

    let password = match args.password.take() {
        Some(password) => password,
        None => rpassword::prompt_password("Ikon password: ")?,
    };
    let notifier = args.transport()?;

    let browser = ikw::site::launch(!args.headed, args.proxy.as_deref())?;
    let mut site = ChromeSite::new(&browser, Selectors::IKON)?;

    let result = watch(&mut site, &notifier, &args, &password).await;

    drop(site);
    drop(browser);

    if let Err(err) = result {
        tracing::error!("\x1b[31mfatal\x1b[0m: {err}");
        std::process::exit(1);
    }

    Ok(())
}
