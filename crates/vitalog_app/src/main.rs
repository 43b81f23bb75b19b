use std::sync::Arc;

use vitalog_app::domains::metrics::{DerivedIndicators, one_rep_max};
use vitalog_app::domains::record::Metric;
use vitalog_app::domains::trends::{TREND_WINDOW_DAYS, steps_series, water_series};
use vitalog_app::services::HISTORY_LIMIT;
use vitalog_app::{Access, Area, VitalogApp};
use vitalog_client::config::Config;
use vitalog_client::observability::Health;
use vitalog_client::{DailyRecord, Gender, UserProfile};

const USAGE: &str = "\
vitalog <command>

  status                                  session state and readiness
  send-otp <phone>                        request a verification code
  verify <handle> <code> <phone>          confirm the code and log in
  logout                                  clear the local session
  onboard <age> <height-cm> <weight-kg> <blood-group> <gender> [name]
  dashboard                               profile, indicators, today's record
  today                                   today's raw record
  log <metric> <delta>                    adjust steps|water|sleep|calories|protein
  history [limit]                         recent days, newest first
  trends                                  7-day water/steps series
  orm <weight-kg> <reps>                  one-rep-max estimate
  ask <question...>                       wellness assistant";

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Configure logging from env var `VITALOG_LOG_LEVEL` (or fallback to `RUST_LOG`, default `info`).
    let log_env = std::env::var("VITALOG_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(log_env.clone())
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("{e}"))?;
    let health = Health::readiness(&config);

    let identity = Arc::new(vitalog_client::http_identity::MessageCentralClient::new(
        &config.identity_base_url,
        config.identity_customer_id.clone(),
        config.identity_auth_token.clone(),
        config.country_code.clone(),
    ));
    let store = Arc::new(vitalog_client::http_store::ReqwestHealthStore::new(
        &config.store_base_url,
        config.store_api_key.clone(),
    ));
    let assistant = Arc::new(vitalog_client::http_ai::GeminiAssistant::new(
        &config.ai_base_url,
        config.ai_api_key.clone(),
        config.ai_model.clone(),
    ));
    let sessions = Arc::new(vitalog_client::session_file::FileSessionStore::open(
        config.session_path.clone(),
    ));

    let app = VitalogApp::new(identity, store, sessions, assistant);
    let state = app.gate.evaluate().await;
    tracing::debug!(?state, "session state derived");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("status");

    match command {
        "status" => {
            println!("session: {:?}", app.gate.state());
            println!(
                "otp provider configured: {}",
                if health.identity_configured { "yes" } else { "no" }
            );
            println!(
                "assistant configured: {}",
                if health.assistant_configured { "yes" } else { "no" }
            );
        }
        "send-otp" => {
            guard(&app, Area::Login)?;
            let phone = require(&args, 1, "phone number")?;
            let handle = app.account.send_otp(phone).await?;
            println!("verification sent; handle: {handle}");
        }
        "verify" => {
            guard(&app, Area::Login)?;
            let handle = require(&args, 1, "verification handle")?;
            let code = require(&args, 2, "code")?;
            let phone = require(&args, 3, "phone number")?;
            if app.account.verify_otp(handle, code, phone).await? {
                println!("verified; session state: {:?}", app.gate.state());
            } else {
                println!("verification failed: wrong or expired code");
            }
        }
        "logout" => {
            app.account.logout().await?;
            println!("logged out");
        }
        "onboard" => {
            guard(&app, Area::Onboarding)?;
            let profile = parse_profile(&args)?;
            app.account.save_profile(&profile).await?;
            println!("profile saved; session state: {:?}", app.gate.state());
        }
        "dashboard" => {
            guard(&app, Area::Dashboard)?;
            let profile = app
                .account
                .profile()
                .await
                .ok_or_else(|| anyhow::anyhow!("profile unavailable"))?;
            let derived = DerivedIndicators::for_profile(&profile);
            if let Some(name) = &profile.name {
                println!("hello, {name}");
            }
            println!(
                "bmi: {} ({}, {})",
                derived.bmi,
                derived.category.label(),
                derived.category.color()
            );
            println!("water goal: {} ml", derived.water_goal_ml);
            print_record(&app.tracker.today().await);
        }
        "today" => {
            guard(&app, Area::Tracker)?;
            print_record(&app.tracker.today().await);
        }
        "log" => {
            guard(&app, Area::Tracker)?;
            let metric: Metric = require(&args, 1, "metric")?
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;
            let delta: f64 = require(&args, 2, "delta")?.parse()?;
            let updated = app.tracker.log_delta(metric, delta).await?;
            print_record(&updated);
        }
        "history" => {
            guard(&app, Area::History)?;
            let limit = match args.get(1) {
                Some(raw) => raw.parse()?,
                None => HISTORY_LIMIT,
            };
            for record in app.tracker.history(limit).await {
                print_record(&record);
            }
        }
        "trends" => {
            guard(&app, Area::Analytics)?;
            let window = app.tracker.trend_window(TREND_WINDOW_DAYS).await;
            if window.is_empty() {
                println!("no history yet");
            }
            for (date, ml) in water_series(&window) {
                println!("{date}  water {ml} ml");
            }
            for (date, steps) in steps_series(&window) {
                println!("{date}  steps {steps}");
            }
        }
        "orm" => {
            guard(&app, Area::Tracker)?;
            let weight: f64 = require(&args, 1, "weight")?.parse()?;
            let reps: u32 = require(&args, 2, "reps")?.parse()?;
            match one_rep_max(weight, reps) {
                Some(estimate) => println!("estimated 1RM: {estimate} kg"),
                None => println!("enter a positive weight and rep count"),
            }
        }
        "ask" => {
            guard(&app, Area::AskAi)?;
            let question = args[1..].join(" ");
            if question.is_empty() {
                anyhow::bail!("missing question");
            }
            println!("{}", app.chat.ask(&question).await);
        }
        "help" | "--help" | "-h" => println!("{USAGE}"),
        other => {
            eprintln!("unknown command {other:?}\n\n{USAGE}");
            std::process::exit(2);
        }
    }

    Ok(())
}

fn require<'a>(args: &'a [String], index: usize, what: &str) -> Result<&'a str, anyhow::Error> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("missing {what}\n\n{USAGE}"))
}

/// Apply the routing table before running a command, mirroring what the
/// navigation layer does on screen changes.
fn guard(app: &VitalogApp, area: Area) -> Result<(), anyhow::Error> {
    match app.gate.route(area) {
        Access::Granted => Ok(()),
        Access::RedirectToLogin => anyhow::bail!("not logged in; run `vitalog send-otp <phone>`"),
        Access::RedirectToOnboarding => {
            anyhow::bail!("profile incomplete; run `vitalog onboard ...`")
        }
        Access::RedirectToMain => anyhow::bail!("already logged in"),
        Access::Pending => anyhow::bail!("session state not derived yet"),
    }
}

fn parse_profile(args: &[String]) -> Result<UserProfile, anyhow::Error> {
    let gender = match require(args, 5, "gender")? {
        "male" => Gender::Male,
        "female" => Gender::Female,
        "other" => Gender::Other,
        raw => anyhow::bail!("gender must be male, female, or other (got {raw:?})"),
    };
    Ok(UserProfile {
        name: args.get(6).cloned(),
        age: require(args, 1, "age")?.parse()?,
        height: require(args, 2, "height")?.parse()?,
        weight: require(args, 3, "weight")?.parse()?,
        blood_group: require(args, 4, "blood group")?.to_string(),
        gender,
    })
}

fn print_record(record: &DailyRecord) {
    let protein = record
        .protein
        .map(|g| format!("{g} g"))
        .unwrap_or_else(|| "not logged".to_string());
    println!(
        "{}  steps {}  water {} ml  sleep {} h  calories {} kcal  protein {}",
        record.date, record.steps, record.water, record.sleep, record.calories, protein
    );
}
