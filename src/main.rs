use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;
use std::time::Duration;

mod api;
mod config;
mod errors;
mod models;
mod router;
mod views;

use crate::api::issues::{IssueApi, IssueClient, ListQuery, SortOrder};
use crate::config::settings::Settings;
use crate::models::issue::{Issue, IssueDraft, KNOWN_PRIORITIES, KNOWN_STATUSES};
use crate::router::Route;
use crate::views::detail::DetailView;
use crate::views::list::ListView;

const SORT_COLUMNS: &[&str] = &["title", "status", "priority", "assignee", "createdAt", "updatedAt"];

#[derive(Parser)]
#[command(name = "issuedesk")]
#[command(version = "0.1.0")]
#[command(about = "Browse, filter and edit issues on your issue tracker", long_about = None)]
struct Cli {
    /// for debugging purposes
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Point issuedesk at an issue server
    Init,

    /// List one page of issues
    List {
        /// Search text (matched against titles by the server)
        #[arg(long)]
        search: Option<String>,

        /// Filter by status (e.g., open, in-progress, closed)
        #[arg(long)]
        status: Option<String>,

        /// Filter by priority (e.g., low, medium, high)
        #[arg(long)]
        priority: Option<String>,

        /// Filter by assignee
        #[arg(long)]
        assignee: Option<String>,

        /// Column to sort by (default: updatedAt)
        #[arg(long)]
        sort_by: Option<String>,

        /// asc or desc (default: desc)
        #[arg(long)]
        order: Option<SortOrder>,

        /// Page number, starting at 1
        #[arg(long, default_value = "1")]
        page: u32,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show a single issue
    Show {
        id: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Open a page by path: "/" for the list, "issues/<id>" for an issue
    Open { path: String },

    /// Create an issue
    Create {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = models::issue::DEFAULT_STATUS)]
        status: String,

        #[arg(long, default_value = models::issue::DEFAULT_PRIORITY)]
        priority: String,

        #[arg(long)]
        assignee: Option<String>,
    },

    /// Edit an existing issue; only the given fields change
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        priority: Option<String>,

        #[arg(long)]
        assignee: Option<String>,
    },

    /// Interactive list: filter, sort, page, view, create and edit
    Browse,

    /// Open the web front-end (or one issue in it) in your browser
    Web { id: Option<String> },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Display current configuration
    Show,

    /// Set a specific configuration value
    Set {
        /// Configuration key (e.g., api.base_url, preferences.page_size)
        key: String,
        /// New value
        value: String,
    },

    /// Validate configuration and test the API connection
    Validate,

    /// Get the path to the config file
    Path,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("{}", e);
    }

    let result = match cli.command {
        Commands::Init => handle_init().await,

        Commands::List {
            search,
            status,
            priority,
            assignee,
            sort_by,
            order,
            page,
            json,
        } => {
            let query = ListQuery {
                search: search.unwrap_or_default(),
                status: status.unwrap_or_default(),
                priority: priority.unwrap_or_default(),
                assignee: assignee.unwrap_or_default(),
                sort_by: sort_by.unwrap_or_else(|| api::issues::DEFAULT_SORT_BY.to_string()),
                order: order.unwrap_or(SortOrder::Desc),
                page,
                ..ListQuery::default()
            };
            handle_list(query, json).await
        }

        Commands::Show { id, json } => handle_show(&id, json).await,

        Commands::Open { path } => handle_open(&path).await,

        Commands::Create {
            title,
            status,
            priority,
            assignee,
        } => handle_create(title, status, priority, assignee).await,

        Commands::Edit {
            id,
            title,
            status,
            priority,
            assignee,
        } => handle_edit(&id, title, status, priority, assignee).await,

        Commands::Browse => handle_browse().await,

        Commands::Web { id } => handle_web(id.as_deref()),

        Commands::Config { action } => handle_config(action).await,
    };

    if let Err(e) = result {
        eprintln!("\n{}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "warn" };

    let filter = tracing_subscriber::EnvFilter::try_from_env("ISSUEDESK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn build_client(settings: &Settings) -> anyhow::Result<IssueClient> {
    settings.validate()?;
    let client = IssueClient::new(settings.api.base_url.clone())
        .with_timeout(Duration::from_secs(settings.api.timeout_secs))?;
    Ok(client)
}

async fn handle_list(mut query: ListQuery, json_output: bool) -> anyhow::Result<()> {
    let settings = Settings::load()?;
    let client = build_client(&settings)?;
    query.page_size = settings.preferences.page_size;

    let issues = client.list_issues(&query).await?;

    if json_output {
        let json = serde_json::to_string_pretty(&issues)?;
        println!("{}", json);
        return Ok(());
    }

    print_page(&query, &issues);
    Ok(())
}

async fn handle_show(id: &str, json_output: bool) -> anyhow::Result<()> {
    let settings = Settings::load()?;
    let client = build_client(&settings)?;

    let route = Route::Detail { id: id.to_string() };
    let detail = DetailView::initialize(&client, &route.params()).await;

    let issue = match (detail.issue(), detail.last_error()) {
        (Some(issue), _) => issue,
        (None, Some(e)) => return Err(e.clone().into()),
        (None, None) => anyhow::bail!("No issue id given"),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(issue)?);
    } else {
        print_issue_detail(issue);
    }

    Ok(())
}

async fn handle_open(path: &str) -> anyhow::Result<()> {
    match Route::parse(path) {
        Some(Route::List) => handle_list(ListQuery::default(), false).await,
        Some(Route::Detail { id }) => handle_show(&id, false).await,
        None => Err(errors::IssueDeskError::UnknownRoute(path.to_string()).into()),
    }
}

async fn handle_create(
    title: String,
    status: String,
    priority: String,
    assignee: Option<String>,
) -> anyhow::Result<()> {
    let settings = Settings::load()?;
    let client = build_client(&settings)?;

    println!("{}", "Creating issue...".cyan().bold());

    let mut draft = IssueDraft::new_default();
    draft.title = Some(title);
    draft.status = Some(status);
    draft.priority = Some(priority);
    if let Some(assignee) = assignee {
        draft.assignee = Some(assignee);
    }

    let issue = client.create_issue(&draft).await?;

    println!();
    println!("{}", "✓ Issue created".green().bold());
    print_issue_detail(&issue);

    Ok(())
}

async fn handle_edit(
    id: &str,
    title: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    assignee: Option<String>,
) -> anyhow::Result<()> {
    let settings = Settings::load()?;
    let client = build_client(&settings)?;

    println!("{}", format!("Updating {}...", id).cyan().bold());

    let current = client.get_issue(id).await?;
    let mut draft = IssueDraft::from(&current);
    if let Some(title) = title {
        draft.title = Some(title);
    }
    if let Some(status) = status {
        draft.status = Some(status);
    }
    if let Some(priority) = priority {
        draft.priority = Some(priority);
    }
    if let Some(assignee) = assignee {
        draft.assignee = Some(assignee);
    }

    let issue = client.update_issue(id, &draft).await?;

    println!();
    println!("{}", "✓ Issue updated".green().bold());
    print_issue_detail(&issue);

    Ok(())
}

fn handle_web(id: Option<&str>) -> anyhow::Result<()> {
    let settings = Settings::load()?;

    let ui_url = settings.ui.url.as_ref().ok_or_else(|| {
        anyhow::anyhow!(
            "Web front-end URL not configured. Set it with: issuedesk config set ui.url <url>"
        )
    })?;

    let route = match id {
        Some(id) => Route::Detail { id: id.to_string() },
        None => Route::List,
    };

    let url = format!("{}{}", ui_url.trim_end_matches('/'), route.path());
    println!("{} {}", "Opening:".dimmed(), url.bright_white());
    open::that(&url)?;

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BrowseAction {
    Refresh,
    Filter,
    Sort,
    PreviousPage,
    NextPage,
    View,
    Create,
    Edit,
    ResumeForm,
    Quit,
}

impl BrowseAction {
    fn label(&self) -> &'static str {
        match self {
            BrowseAction::Refresh => "Refresh",
            BrowseAction::Filter => "Search / filter",
            BrowseAction::Sort => "Sort by column",
            BrowseAction::PreviousPage => "Previous page",
            BrowseAction::NextPage => "Next page",
            BrowseAction::View => "View issue",
            BrowseAction::Create => "New issue",
            BrowseAction::Edit => "Edit issue",
            BrowseAction::ResumeForm => "Resume unsaved form",
            BrowseAction::Quit => "Quit",
        }
    }
}

fn browse_actions(form_open: bool) -> Vec<BrowseAction> {
    let mut actions = vec![
        BrowseAction::Refresh,
        BrowseAction::Filter,
        BrowseAction::Sort,
        BrowseAction::PreviousPage,
        BrowseAction::NextPage,
        BrowseAction::View,
        BrowseAction::Create,
        BrowseAction::Edit,
    ];
    if form_open {
        actions.push(BrowseAction::ResumeForm);
    }
    actions.push(BrowseAction::Quit);
    actions
}

async fn handle_browse() -> anyhow::Result<()> {
    use dialoguer::Select;

    let settings = Settings::load()?;
    let client: Arc<dyn IssueApi> = Arc::new(build_client(&settings)?);
    let mut view = ListView::new(client.clone(), settings.preferences.page_size);

    report(view.initialize().await);

    loop {
        println!();
        print_page(view.query(), view.issues());
        println!();

        let actions = browse_actions(view.form().visible);
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();

        let selection = Select::new()
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        let Some(index) = selection else { break };

        match actions[index] {
            BrowseAction::Refresh => report(view.reload().await),
            BrowseAction::Filter => {
                prompt_filters(&mut view)?;
                report(view.reload().await);
            }
            BrowseAction::Sort => {
                let current = SORT_COLUMNS
                    .iter()
                    .position(|c| *c == view.query().sort_by)
                    .unwrap_or(0);
                let choice = Select::new()
                    .with_prompt("Sort by (same column flips the order)")
                    .items(SORT_COLUMNS)
                    .default(current)
                    .interact_opt()?;
                if let Some(i) = choice {
                    report(view.sort(SORT_COLUMNS[i]).await);
                }
            }
            BrowseAction::PreviousPage => {
                if view.query().page == 1 {
                    println!("{}", "  Already on the first page".dimmed());
                }
                report(view.previous_page().await);
            }
            BrowseAction::NextPage => report(view.next_page().await),
            BrowseAction::View => {
                if let Some(issue) = pick_issue(view.issues(), "View which issue?")? {
                    let route = view.view(&issue);
                    println!("{}", route.path().dimmed());
                    let detail = DetailView::initialize(client.as_ref(), &route.params()).await;
                    match (detail.issue(), detail.last_error()) {
                        (Some(issue), _) => print_issue_detail(issue),
                        (None, Some(e)) => eprintln!("{}", e),
                        (None, None) => {}
                    }
                }
            }
            BrowseAction::Create => {
                view.open_create_form();
                run_form(&mut view).await?;
            }
            BrowseAction::Edit => {
                if let Some(issue) = pick_issue(view.issues(), "Edit which issue?")? {
                    view.open_edit_form(&issue);
                    run_form(&mut view).await?;
                }
            }
            BrowseAction::ResumeForm => run_form(&mut view).await?,
            BrowseAction::Quit => break,
        }
    }

    Ok(())
}

fn report(result: errors::Result<()>) {
    if let Err(e) = result {
        eprintln!("\n{}", e);
    }
}

fn pick_issue(issues: &[Issue], prompt: &str) -> anyhow::Result<Option<Issue>> {
    use dialoguer::Select;

    if issues.is_empty() {
        println!("{}", "  No issues on this page".dimmed());
        return Ok(None);
    }

    let items: Vec<String> = issues
        .iter()
        .map(|i| format!("{} [{}] {}", i.id, i.status, i.title))
        .collect();

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .interact_opt()?;

    Ok(selection.map(|index| issues[index].clone()))
}

fn prompt_filters(view: &mut ListView) -> anyhow::Result<()> {
    use dialoguer::Input;

    let search: String = Input::<String>::new()
        .with_prompt("Search")
        .with_initial_text(view.query().search.clone())
        .allow_empty(true)
        .interact_text()?;
    view.set_search(search.trim());

    let status = select_vocabulary("Status", KNOWN_STATUSES, &view.query().status, true)?;
    view.set_status_filter(&status);

    let priority = select_vocabulary("Priority", KNOWN_PRIORITIES, &view.query().priority, true)?;
    view.set_priority_filter(&priority);

    let assignee: String = Input::<String>::new()
        .with_prompt("Assignee")
        .with_initial_text(view.query().assignee.clone())
        .allow_empty(true)
        .interact_text()?;
    view.set_assignee_filter(assignee.trim());

    Ok(())
}

/// Picks from the known values. `any` adds an empty choice; an unknown current value is kept as a choice.
fn select_vocabulary(
    prompt: &str,
    known: &[&str],
    current: &str,
    any: bool,
) -> anyhow::Result<String> {
    use dialoguer::Select;

    let mut choices: Vec<String> = Vec::new();
    if any {
        choices.push(String::new());
    }
    choices.extend(known.iter().map(|s| s.to_string()));
    if !current.is_empty() && !choices.iter().any(|c| c == current) {
        choices.push(current.to_string());
    }

    let labels: Vec<String> = choices
        .iter()
        .map(|c| if c.is_empty() { "(any)".to_string() } else { c.clone() })
        .collect();
    let default = choices.iter().position(|c| c == current).unwrap_or(0);

    let index = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact()?;

    Ok(choices[index].clone())
}

async fn run_form(view: &mut ListView) -> anyhow::Result<()> {
    use dialoguer::{Confirm, Input};

    let heading = if view.form().editing { "Edit issue" } else { "New issue" };
    println!();
    println!("{}", heading.cyan().bold());

    let draft = view.form().draft.clone();

    let title: String = Input::<String>::new()
        .with_prompt("Title")
        .with_initial_text(draft.title.clone().unwrap_or_default())
        .interact_text()?;
    let status = select_vocabulary(
        "Status",
        KNOWN_STATUSES,
        draft.status.as_deref().unwrap_or_default(),
        false,
    )?;
    let priority = select_vocabulary(
        "Priority",
        KNOWN_PRIORITIES,
        draft.priority.as_deref().unwrap_or_default(),
        false,
    )?;
    let assignee: String = Input::<String>::new()
        .with_prompt("Assignee")
        .with_initial_text(draft.assignee.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    {
        let draft = view.draft_mut();
        draft.title = Some(title);
        draft.status = Some(status);
        draft.priority = Some(priority);
        draft.assignee = Some(assignee);
    }

    let save = Confirm::new()
        .with_prompt("Save?")
        .default(true)
        .interact()?;

    if !save {
        view.close_form();
        println!("{}", "  Discarded (values kept for next time)".dimmed());
        return Ok(());
    }

    match view.save().await {
        Ok(issue) => println!("{}", format!("✓ Saved {}", issue.id).green().bold()),
        Err(e) => {
            eprintln!("\n{}", e);
            println!("{}", "  The form is still open; choose 'Resume unsaved form' to retry".dimmed());
        }
    }

    Ok(())
}

fn status_colored(status: &str) -> ColoredString {
    match status {
        "open" => status.yellow(),
        "in-progress" => status.green(),
        "closed" => status.bright_black(),
        _ => status.normal(),
    }
}

fn priority_colored(priority: &str) -> ColoredString {
    match priority {
        "high" => priority.red().bold(),
        "medium" => priority.normal(),
        "low" => priority.dimmed(),
        _ => priority.normal(),
    }
}

fn describe_query(query: &ListQuery) -> String {
    let mut parts = Vec::new();
    if !query.search.is_empty() {
        parts.push(format!("search \"{}\"", query.search));
    }
    if !query.status.is_empty() {
        parts.push(format!("status={}", query.status));
    }
    if !query.priority.is_empty() {
        parts.push(format!("priority={}", query.priority));
    }
    if !query.assignee.is_empty() {
        parts.push(format!("assignee={}", query.assignee));
    }
    parts.push(format!("sorted by {} {}", query.sort_by, query.order));
    parts.push(format!("page {}", query.page));
    parts.join(", ")
}

fn print_page(query: &ListQuery, issues: &[Issue]) {
    println!("{}", "Issues".cyan().bold());
    println!("  {}", describe_query(query).dimmed());
    println!();

    if issues.is_empty() {
        println!("{}", "  No issues on this page".dimmed());
        return;
    }

    for issue in issues {
        let assignee = issue
            .assignee
            .as_deref()
            .filter(|a| !a.is_empty())
            .map(|a| format!("@{}", a))
            .unwrap_or_default();

        println!(
            "  {} [{}] [{}]  {}  {}",
            issue.id.bright_white().bold(),
            status_colored(&issue.status),
            priority_colored(&issue.priority),
            issue.title,
            assignee.dimmed()
        );
    }
}

fn print_issue_detail(issue: &Issue) {
    println!();
    println!("  {} {}", "Id:".bold(), issue.id.bright_white());
    println!("  {} {}", "Title:".bold(), issue.title.bright_white());
    println!("  {} {}", "Status:".bold(), status_colored(&issue.status));
    println!("  {} {}", "Priority:".bold(), priority_colored(&issue.priority));
    match issue.assignee.as_deref().filter(|a| !a.is_empty()) {
        Some(assignee) => println!("  {} {}", "Assignee:".bold(), assignee.bright_white()),
        None => println!("  {} {}", "Assignee:".bold(), "unassigned".dimmed()),
    }
    println!(
        "  {} {}",
        "Created:".bold(),
        issue.created_at.format("%Y-%m-%d %H:%M UTC").to_string().dimmed()
    );
    println!(
        "  {} {}",
        "Updated:".bold(),
        issue.updated_at.format("%Y-%m-%d %H:%M UTC").to_string().dimmed()
    );
}

async fn handle_init() -> anyhow::Result<()> {
    println!("{}", "issuedesk Configuration Setup".cyan().bold());
    println!();
    println!(
        "{}",
        "This will store your settings in ~/.issuedesk/config.toml".dimmed()
    );
    println!();

    let defaults = Settings::load_file()?;

    let mut settings = defaults.clone();
    let base_url = prompt_with_default("Issue API base URL", &defaults.api.base_url)?;
    settings.set("api.base_url", &base_url)?;

    let ui_default = defaults.ui.url.clone().unwrap_or_default();
    let ui_url = prompt_with_default("Web front-end URL (optional)", &ui_default)?;
    settings.set("ui.url", &ui_url)?;

    let page_size = prompt_with_default(
        "Issues per page",
        &defaults.preferences.page_size.to_string(),
    )?;
    settings.set("preferences.page_size", &page_size)?;

    settings.validate()?;

    println!();
    print!("{}", "  Testing API connection... ".dimmed());
    std::io::Write::flush(&mut std::io::stdout())?;

    let client = build_client(&settings)?;
    match client.health().await {
        Ok(_) => println!("{}", "✓".green().bold()),
        Err(e) => {
            println!("{}", "✗".red().bold());
            return Err(errors::IssueDeskError::ConfigValidationFailed(format!(
                "Could not reach {}: {}",
                client.base_url(),
                e
            ))
            .into());
        }
    }

    settings.save()?;

    println!();
    println!("{}", "Configuration saved!".green().bold());
    println!(
        "  Location: {}",
        Settings::config_path()?.display().to_string().bright_white()
    );

    Ok(())
}

fn prompt_with_default(message: &str, default: &str) -> anyhow::Result<String> {
    use std::io::Write;
    print!("{} [{}]: ", message.bright_white(), default.dimmed());
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

async fn handle_config(action: ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let settings = Settings::load()?;

            println!("{}", "Current Configuration".cyan().bold());
            println!();

            println!("{}", "[api]".bold());
            println!("  {} {}", "base_url:".dimmed(), settings.api.base_url.bright_white());
            println!(
                "  {} {}",
                "timeout_secs:".dimmed(),
                settings.api.timeout_secs.to_string().bright_white()
            );

            println!();
            println!("{}", "[ui]".bold());
            match &settings.ui.url {
                Some(url) => println!("  {} {}", "url:".dimmed(), url.bright_white()),
                None => println!("  {} {}", "url:".dimmed(), "not set".dimmed()),
            }

            println!();
            println!("{}", "[preferences]".bold());
            println!(
                "  {} {}",
                "page_size:".dimmed(),
                settings.preferences.page_size.to_string().bright_white()
            );

            Ok(())
        }

        ConfigAction::Set { key, value } => {
            let mut settings = Settings::load_file()?;
            settings.set(&key, &value)?;
            settings.validate()?;
            settings.save()?;

            println!("{}", format!("✓ Updated {} to: {}", key, value).green().bold());
            println!();
            println!("{}", "Configuration saved successfully!".green());

            Ok(())
        }

        ConfigAction::Validate => {
            println!("{}", "Validating configuration...".cyan().bold());
            println!();

            let settings = Settings::load()?;

            print!("{}", "  Checking values... ".dimmed());
            std::io::Write::flush(&mut std::io::stdout())?;
            if let Err(e) = settings.validate() {
                println!("{}", "✗".red().bold());
                return Err(e.into());
            }
            println!("{}", "✓".green().bold());

            print!("{}", "  Testing API connection... ".dimmed());
            std::io::Write::flush(&mut std::io::stdout())?;

            let client = build_client(&settings)?;
            match client.health().await {
                Ok(_) => {
                    println!("{}", "✓".green().bold());
                }
                Err(e) => {
                    println!("{}", "✗".red().bold());
                    return Err(errors::IssueDeskError::ConfigValidationFailed(format!(
                        "API connection failed: {}",
                        e
                    ))
                    .into());
                }
            }

            println!();
            println!("{}", "✓ All validations passed!".green().bold());

            Ok(())
        }

        ConfigAction::Path => {
            println!("{}", Settings::config_path()?.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_args_parse() {
        let cli = Cli::parse_from([
            "issuedesk", "list", "--status", "open", "--order", "asc", "--page", "2",
        ]);
        match cli.command {
            Commands::List {
                status, order, page, search, ..
            } => {
                assert_eq!(status.as_deref(), Some("open"));
                assert_eq!(order, Some(SortOrder::Asc));
                assert_eq!(page, 2);
                assert!(search.is_none());
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_create_defaults() {
        let cli = Cli::parse_from(["issuedesk", "create", "--title", "Fix crash"]);
        match cli.command {
            Commands::Create { status, priority, assignee, .. } => {
                assert_eq!(status, "open");
                assert_eq!(priority, "medium");
                assert!(assignee.is_none());
            }
            _ => panic!("expected create command"),
        }
    }

    #[test]
    fn test_bad_order_rejected() {
        assert!(Cli::try_parse_from(["issuedesk", "list", "--order", "up"]).is_err());
    }

    #[test]
    fn test_browse_actions_offer_resume_only_with_open_form() {
        assert!(!browse_actions(false).contains(&BrowseAction::ResumeForm));
        let with_form = browse_actions(true);
        assert!(with_form.contains(&BrowseAction::ResumeForm));
        assert_eq!(with_form.last(), Some(&BrowseAction::Quit));
    }

    #[test]
    fn test_describe_query_defaults() {
        assert_eq!(
            describe_query(&ListQuery::default()),
            "sorted by updatedAt desc, page 1"
        );
    }

    #[test]
    fn test_describe_query_with_filters() {
        let query = ListQuery {
            search: "crash".to_string(),
            status: "open".to_string(),
            ..ListQuery::default()
        };
        assert_eq!(
            describe_query(&query),
            "search \"crash\", status=open, sorted by updatedAt desc, page 1"
        );
    }

    #[test]
    fn test_web_paths() {
        let ui = "http://localhost:4200/";
        let list = format!("{}{}", ui.trim_end_matches('/'), Route::List.path());
        let detail = format!(
            "{}{}",
            ui.trim_end_matches('/'),
            Route::Detail { id: "a1".to_string() }.path()
        );
        assert_eq!(list, "http://localhost:4200/");
        assert_eq!(detail, "http://localhost:4200/issues/a1");
    }
}
