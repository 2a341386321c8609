use clap::Parser;
use patient_list::domain::ports::ConfigProvider;
use patient_list::utils::{logger, validation::Validate};
use patient_list::{
    CliConfig, ControllerSettings, ListPageController, ListViewModel, LoadOutcome,
    PatientListError, RestListDataService, TomlConfig,
};

#[tokio::main]
async fn main() {
    let args = CliConfig::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting patient-list CLI");
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    let result = match &args.config {
        Some(path) => match load_toml(path) {
            Ok(config) => {
                let settings = config.controller_settings();
                run(&config, settings, &args).await
            }
            Err(e) => Err(e),
        },
        None => match args.validate() {
            Ok(()) => run(&args, ControllerSettings::from_config(&args), &args).await,
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        tracing::error!("❌ patient-list failed: {}", e);
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

fn load_toml(path: &str) -> Result<TomlConfig, PatientListError> {
    tracing::info!("Loading configuration from {}", path);
    let config = TomlConfig::from_file(path)?;
    config.validate()?;
    Ok(config)
}

async fn run<C: ConfigProvider>(
    config: &C,
    settings: ControllerSettings,
    args: &CliConfig,
) -> Result<(), PatientListError> {
    let service = RestListDataService::new(config)?;
    tracing::debug!("Using {}", service.resource_url());

    let controller = ListPageController::new(service, settings);

    // 載入清單標題
    if controller.open().await == LoadOutcome::Failed {
        return Err(load_failure("patient lists", &controller.view().snapshot().await));
    }

    let view = controller.view().snapshot().await;
    let title = controller
        .identity()
        .map(|identity| identity.title.clone())
        .unwrap_or_default();
    print_summaries(&title, &view);

    let Some(list_id) = &args.list else {
        return Ok(());
    };

    let limit = config.page_limit();
    if controller.load_list_members(list_id, args.page, limit).await == LoadOutcome::Failed {
        return Err(load_failure("list members", &controller.view().snapshot().await));
    }

    print_members(&controller.view().snapshot().await);
    Ok(())
}

fn load_failure(what: &str, view: &ListViewModel) -> PatientListError {
    PatientListError::LoadError {
        what: what.to_string(),
        message: view
            .last_error
            .clone()
            .unwrap_or_else(|| "request failed".to_string()),
    }
}

fn print_summaries(title: &str, view: &ListViewModel) {
    println!("📋 {}", title);
    if view.summaries.is_empty() {
        println!("  (no patient lists)");
        return;
    }
    for summary in &view.summaries {
        match &summary.description {
            Some(description) => {
                println!("  {}  {} - {}", summary.id, summary.display_name, description)
            }
            None => println!("  {}  {}", summary.id, summary.display_name),
        }
    }
    println!();
}

fn print_members(view: &ListViewModel) {
    let list_name = view
        .selected_list
        .as_deref()
        .map(|id| view.summary(id).map_or(id, |s| s.display_name.as_str()))
        .unwrap_or_default();

    match view.display_range() {
        Some((from, to)) => println!(
            "👥 {}: showing {}-{} of {} (page {}/{})",
            list_name,
            from,
            to,
            view.page.total_results,
            view.page.current_page,
            view.total_pages()
        ),
        None => {
            println!("👥 {}: no patients on this page", list_name);
            return;
        }
    }

    for member in &view.members {
        let header = member
            .header_content()
            .or_else(|| member.uuid())
            .unwrap_or("-");
        println!("  • {}", header);
        if let Some(body) = member.body_content() {
            println!("    {}", body);
        }
    }
}
