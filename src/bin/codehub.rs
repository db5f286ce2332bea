use clap::{Parser, Subcommand};

use codehub::config::ClientOptions;
use codehub::page::Page;
use codehub::render;
use codehub::search::SearchKind;
use codehub::views::{
    HomeView, IssueView, NewRepositoryForm, ProfileView, RepositoryFields, RepositoryView,
    SearchView, View, ViewState,
};
use codehub::Codehub;

#[derive(Parser, Debug)]
#[clap(name = "codehub", version)]
#[clap(about = "Browse a Codehub server from the terminal", long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    /// Backend address. Overrides CODEHUB_API_URL.
    #[clap(long)]
    api_url: Option<String>,

    /// Acting user id. Overrides CODEHUB_ACTOR_ID.
    #[clap(long)]
    actor: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List public repositories
    Repos {
        #[clap(long, default_value = "0")]
        skip: u32,
        #[clap(long, default_value = "20")]
        limit: u32,
    },
    /// Show a repository with its commits and issues
    Repo { id: u64 },
    /// Show an issue
    Issue {
        repo: u64,
        id: u64,
        /// Close the issue if open, reopen it if closed
        #[clap(long)]
        toggle: bool,
    },
    /// Show a user with their repositories and stars
    Profile { username: String },
    /// Search users and repositories
    Search {
        query: String,
        /// all, users or repositories
        #[clap(long = "type", default_value = "all")]
        kind: SearchKind,
    },
    /// Create a repository
    NewRepo {
        #[clap(long)]
        name: String,
        /// Owner id. Defaults to the acting user.
        #[clap(long)]
        owner: Option<u64>,
        #[clap(long)]
        description: Option<String>,
        #[clap(long)]
        private: bool,
    },
    /// Star a repository as the acting user, or unstar it if already starred
    Star { repo: u64 },
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

/// Print the error banner and return the snapshot when the view is ready
fn ready<T>(state: ViewState<T>) -> Option<T> {
    match state {
        ViewState::Ready(data) => Some(data),
        ViewState::Failed(err) => {
            eprintln!("{}", render::error_banner(&err));
            None
        }
        ViewState::Idle | ViewState::Loading => None,
    }
}

async fn show_repository(codehub: Codehub, id: u64) -> Option<()> {
    let view = RepositoryView::new(codehub, id);
    view.load().await;
    let detail = ready(view.snapshot().await)?;

    print_lines(render::repository_card(&detail.repository));
    if let Some(starred) = detail.starred {
        println!(
            "  {}",
            render::star_button_label(starred, detail.repository.stars_count)
        );
    }

    println!();
    println!("Commits ({})", detail.commits_total);
    if detail.commits.is_empty() {
        println!("  No commits yet");
    }
    for commit in &detail.commits {
        print_lines(render::commit_card(commit));
    }

    println!();
    println!(
        "Issues ({} open of {})",
        detail.open_issue_count(),
        detail.issues_total
    );
    if detail.issues.is_empty() {
        println!("  No issues yet");
    }
    for issue in &detail.issues {
        print_lines(render::issue_card(issue));
    }
    Some(())
}

async fn run() -> anyhow::Result<bool> {
    dotenv::dotenv().ok();
    pretty_env_logger::init();
    let cli = Cli::parse();

    let mut options = ClientOptions::from_env()?;
    if let Some(api_url) = cli.api_url {
        options = options.with_api_url(&api_url);
    }
    if cli.actor.is_some() {
        options = options.with_actor_id(cli.actor);
    }
    let codehub = Codehub::new_with_options(options)?;

    let shown = match cli.command {
        Commands::Repos { skip, limit } => {
            let view = HomeView::new(codehub).with_page(Page::new(skip, limit));
            view.load().await;
            ready(view.snapshot().await).map(|list| {
                if list.repositories.is_empty() {
                    println!("No repositories yet");
                }
                for repository in &list.repositories {
                    print_lines(render::repository_card(repository));
                }
            })
        }
        Commands::Repo { id } => show_repository(codehub, id).await,
        Commands::Issue { repo, id, toggle } => {
            let view = IssueView::new(codehub, repo, id);
            view.load().await;
            if toggle {
                view.toggle_status().await;
            }
            ready(view.snapshot().await).map(|issue| {
                println!("{} #{}", issue.title, issue.id);
                println!(
                    "{}  {} opened this issue on {}",
                    render::status_badge(issue.status),
                    render::display_name(issue.creator.as_ref()),
                    render::format_date(&issue.created_at)
                );
                match issue.description.as_deref().filter(|d| !d.is_empty()) {
                    Some(description) => println!("\n{}", description),
                    None => println!("\nNo description provided."),
                }
            })
        }
        Commands::Profile { username } => {
            let view = ProfileView::new(codehub, &username);
            view.load().await;
            ready(view.snapshot().await).map(|profile| {
                print_lines(render::user_card(&profile.user));
                println!();
                println!("Repositories ({})", profile.repositories_total);
                if profile.repositories.is_empty() {
                    println!("  No repositories yet");
                }
                for repository in &profile.repositories {
                    print_lines(render::repository_card(repository));
                }
                println!();
                println!("Starred ({})", profile.starred_total);
                if profile.starred.is_empty() {
                    println!("  No starred repositories yet");
                }
                for repository in &profile.starred {
                    print_lines(render::repository_card(repository));
                }
            })
        }
        Commands::Search { query, kind } => {
            let view = SearchView::new(codehub);
            if !view.search(&query, kind).await {
                println!("Nothing to search for");
                return Ok(true);
            }
            ready(view.snapshot().await).map(|outcome| {
                let results = outcome.results;
                if results.is_empty() {
                    println!("No results found");
                }
                if outcome.kind.includes_repositories() {
                    println!("Repositories ({})", results.repositories_total);
                    for repository in &results.repositories {
                        print_lines(render::repository_card(repository));
                    }
                }
                if outcome.kind.includes_users() {
                    println!("Users ({})", results.users_total);
                    for user in &results.users {
                        print_lines(render::user_card(user));
                    }
                }
            })
        }
        Commands::NewRepo {
            name,
            owner,
            description,
            private,
        } => {
            let form = NewRepositoryForm::new(codehub.clone());
            form.set_fields(RepositoryFields {
                name,
                description: description.unwrap_or_default(),
                owner_id: owner,
                is_public: !private,
            })
            .await;

            match form.submit().await {
                Ok(repository) => show_repository(codehub, repository.id).await,
                Err(_) => {
                    if let Some(message) = form.error().await {
                        eprintln!("Error: {}", message);
                    }
                    None
                }
            }
        }
        Commands::Star { repo } => {
            let view = RepositoryView::new(codehub, repo);
            view.load().await;
            let before = ready(view.snapshot().await).and_then(|d| d.starred);
            let after = view.toggle_star().await;
            match (before, after) {
                (Some(before), Some(after)) if before != after => {
                    let count = view
                        .snapshot()
                        .await
                        .into_data()
                        .map(|d| d.repository.stars_count)
                        .unwrap_or_default();
                    println!("{}", render::star_button_label(after, count));
                    Some(())
                }
                _ => {
                    eprintln!("Star was not changed (see log output; is an acting user set?)");
                    None
                }
            }
        }
    };

    Ok(shown.is_some())
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(2);
        }
    }
}
