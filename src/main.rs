use anyhow::Context;
use clap::Parser;
use dealer_portal::config::cli::{login_form, Command, ServicesCommand};
use dealer_portal::core::services::tier_note;
use dealer_portal::core::{AuthApi, KeyValueStore, ServiceForm, ServiceItem, Tier, VisibleLimit};
use dealer_portal::utils::error::ErrorSeverity;
use dealer_portal::utils::{logger, validation::Validate};
use dealer_portal::{CliConfig, DealerPortal, LocalStorage, PortalError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::debug!("Using data directory {}", config.storage_path());

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.storage_path());
    let mut portal = DealerPortal::with_mock_auth(storage, config.latency())
        .with_context(|| format!("failed to open portal data in {}", config.storage_path()))?;

    if let Err(e) = run(&mut portal, cli.command).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run<S, A>(portal: &mut DealerPortal<S, A>, command: Command) -> Result<(), PortalError>
where
    S: KeyValueStore + Clone,
    A: AuthApi,
{
    match command {
        Command::Register(args) => {
            let response = portal.register(&args.into()).await?;
            println!("✅ {}", response.message);
            println!("🆔 User ID: {}", response.user_id);
            print_benefits(response.user.tier);
        }
        Command::Login { email, password } => {
            let response = portal.login(&login_form(email, password)).await?;
            println!("✅ {}", response.message);
            println!(
                "👤 {} {} ({}, {} tier)",
                response.user.first_name,
                response.user.last_name,
                response.user.company_name,
                response.user.tier
            );
        }
        Command::Logout => {
            portal.logout();
            println!("👋 Signed out");
        }
        Command::Whoami => match portal.session().user() {
            Some(user) if portal.is_authenticated() => {
                println!("👤 {} {} <{}>", user.first_name, user.last_name, user.business_email);
                println!("🏢 {}", user.company_name);
                println!("🏅 Tier: {}", user.tier);
                if let Some(role) = portal.session().role() {
                    println!("🔑 Role: {}", role);
                }
            }
            _ => println!("Not signed in"),
        },
        Command::Tiers => {
            for tier in Tier::ALL {
                print_benefits(tier);
            }
        }
        Command::Services { action } => {
            portal.require_session()?;
            run_services(portal, action)?;
        }
    }

    Ok(())
}

fn run_services<S, A>(portal: &mut DealerPortal<S, A>, action: ServicesCommand) -> Result<(), PortalError>
where
    S: KeyValueStore + Clone,
    A: AuthApi,
{
    let tier = portal.dealer().tier;

    let changed = match action {
        ServicesCommand::List => {
            print_services(portal.services().items(), tier);
            false
        }
        ServicesCommand::Add(args) => {
            let form: ServiceForm = args.into();
            form.validate()?;
            let id = portal.services_mut().add(form);
            println!("✅ Added service {}", id);
            true
        }
        ServicesCommand::Edit { id, service } => {
            let form: ServiceForm = service.into();
            form.validate()?;
            let updated = portal.services_mut().edit(&id, form);
            report_change(updated, "Updated", &id)
        }
        ServicesCommand::Remove { id } => {
            let removed = portal.services_mut().delete(&id);
            report_change(removed, "Removed", &id)
        }
        ServicesCommand::Toggle { id } => {
            let toggled = portal.services_mut().toggle_visible(&id);
            report_change(toggled, "Toggled visibility of", &id)
        }
        ServicesCommand::Move { id, over } => {
            let moved = portal.services_mut().move_item(&id, &over);
            report_change(moved, "Moved", &id)
        }
        ServicesCommand::Seed => {
            let seeded = portal.seed_demo_services_if_empty();
            if seeded {
                println!("✅ Loaded demo services");
            } else {
                println!("Services list is not empty; nothing seeded");
            }
            seeded
        }
    };

    if changed {
        portal.save_services()?;
        print_services(portal.services().items(), tier);
    }

    Ok(())
}

fn report_change(changed: bool, verb: &str, id: &str) -> bool {
    if changed {
        println!("✅ {} service {}", verb, id);
    } else {
        println!("No service with id {}; nothing changed", id);
    }
    changed
}

fn print_services(items: &[ServiceItem], tier: Tier) {
    println!("{}", tier_note(tier));

    if items.is_empty() {
        println!("(no services yet)");
        return;
    }

    for (index, item) in items.iter().enumerate() {
        let visibility = if item.visible { "visible" } else { "hidden" };
        let price = item.price.as_deref().unwrap_or("-");
        println!("#{} [{}] {} | {} | {}", index + 1, visibility, item.title, price, item.id);
        if let Some(description) = &item.description {
            println!("     {}", description);
        }
    }

    if let VisibleLimit::Limited(limit) = tier.visible_limit() {
        if items.len() > limit {
            println!(
                "⚠️  Only the top {} will appear publicly for your {} tier.",
                limit, tier
            );
        }
    }
}

fn print_benefits(tier: Tier) {
    let benefits = tier.benefits();
    println!("🏅 {}", benefits.title);
    for feature in &benefits.features {
        println!("   • {}", feature);
    }
}
