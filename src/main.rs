//! careerpath: command-line front end for the CareerPath learning platform

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{debug, info};

use careerpath_client::views::achievements::AchievementBadge;
use careerpath_client::{
    compute_level, AchievementsView, AdminConsole, ApiClient, AppConfig, Category,
    CommunitiesView, CourseLevel, CoursesView, DashboardView, DataSource, EngageOutcome,
    ProfileView, ProgressView, ViewScope,
};

#[derive(Parser)]
#[command(name = "careerpath")]
#[command(about = "Track learning progress and browse the CareerPath catalog")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "careerpath.toml")]
    config: String,

    /// API base URL (overrides config file)
    #[arg(long, env = "CAREERPATH_API_URL")]
    api_url: Option<String>,

    /// Bearer token (overrides config file)
    #[arg(long, env = "CAREERPATH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stats, level and top recommendations
    Dashboard,
    /// Recommended courses
    Courses {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        level: Option<String>,
    },
    /// Recommended communities, or all when there are none
    Communities {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Progress history and weekly/monthly analytics
    Progress,
    /// Unlocked achievements
    Achievements,
    /// Start a course
    Start { course_id: String },
    /// Show the level for a score without contacting the server
    Level { score: i64 },
    /// Show or edit the profile
    Profile {
        #[arg(long)]
        add_skill: Vec<String>,
        #[arg(long)]
        remove_skill: Vec<String>,
        #[arg(long)]
        add_goal: Vec<String>,
        #[arg(long)]
        add_industry: Vec<String>,
    },
    /// Administrative operations
    #[command(subcommand)]
    Admin(AdminCommands),
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Platform totals
    Stats,
    /// Communities awaiting approval
    Pending,
    /// Approve a pending community
    Approve { community_id: String },
    /// Delete a course
    DeleteCourse { course_id: String },
    /// Registration counts per course and category
    Registrations,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("careerpath=info".parse()?)
                .add_directive("careerpath_client=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    if let Some(token) = cli.token {
        config.api.token = Some(token);
    }
    config.validate()?;

    debug!("API: {}", config.api.base_url);

    if let Commands::Level { score } = cli.command {
        let summary = compute_level(score, &config.leveling.thresholds);
        print_level(&summary);
        return Ok(());
    }

    let client = Arc::new(ApiClient::new(config.api.clone())?);
    let source: Arc<dyn DataSource> = client.clone();

    match cli.command {
        Commands::Dashboard => {
            let view = DashboardView::load(source.as_ref(), &config).await;
            println!("Total XP:   {}", view.stats.total_score);
            println!("Streak:     {} days", view.stats.streak_days);
            println!("Completed:  {}", view.stats.completed_count);
            println!("Time:       {}h", view.total_hours());
            print_level(&view.level);
            if !view.recommendations.is_empty() {
                println!("\nRecommended for you:");
                for course in &view.recommendations {
                    println!("  {} [{}] {}", course.id, course.level, course.title);
                }
            }
        }
        Commands::Courses {
            search,
            category,
            level,
        } => {
            let scope = ViewScope::mount("courses");
            let Some(mut view) = scope.run(CoursesView::load(source, &config)).await else {
                return Ok(());
            };
            view.set_search(search.unwrap_or_default());
            view.set_category(parse_category(category.as_deref())?);
            view.set_level(parse_level(level.as_deref())?);

            for card in view.cards() {
                let marker = if card.action.is_enabled() { " " } else { "*" };
                println!(
                    "{} {} [{} / {}] {} ({}h)",
                    marker,
                    card.course.id,
                    card.course.category,
                    card.course.level,
                    card.course.title,
                    card.course.duration
                );
            }
        }
        Commands::Communities { search, category } => {
            let mut view = CommunitiesView::load(source.as_ref()).await;
            view.set_search(search.unwrap_or_default());
            view.set_category(parse_category(category.as_deref())?);
            for community in view.filtered() {
                println!(
                    "{} [{}] {} ({} members)",
                    community.id,
                    community.category,
                    community.name,
                    community.member_count.unwrap_or(0)
                );
            }
        }
        Commands::Progress => {
            let view = ProgressView::load(source.as_ref(), &config).await;
            print_level(&view.level);
            if let Some(analytics) = view.analytics {
                println!(
                    "This week:  {} XP, {}h, {} activities",
                    analytics.weekly.score,
                    analytics.weekly.hours(),
                    analytics.weekly.activities
                );
                println!(
                    "This month: {} XP, {}h, {} activities",
                    analytics.monthly.score,
                    analytics.monthly.hours(),
                    analytics.monthly.activities
                );
            }
            println!("\nRecent activity:");
            for entry in view.recent_activity() {
                let when = entry
                    .at
                    .map(|t| t.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                println!("  {:<10} +{} XP  {}", when, entry.score_gained, entry.label);
            }
        }
        Commands::Achievements => {
            let view = AchievementsView::load(source.as_ref()).await;
            for badge in view.badges() {
                print_badge(&badge);
            }
            println!("Total reward: {} XP", view.total_reward());
        }
        Commands::Start { course_id } => {
            let view = CoursesView::load(source, &config).await;
            let outcome = view.engage(&course_id).await;
            match outcome.notice() {
                Some(notice) => println!("{}", notice),
                None if outcome == EngageOutcome::AlreadyMember => {
                    println!("Already started {}", course_id)
                }
                None => {}
            }
            if matches!(outcome, EngageOutcome::Rejected(_)) {
                std::process::exit(1);
            }
        }
        Commands::Profile {
            add_skill,
            remove_skill,
            add_goal,
            add_industry,
        } => {
            let mut view = ProfileView::load(client).await;
            let editing = !(add_skill.is_empty()
                && remove_skill.is_empty()
                && add_goal.is_empty()
                && add_industry.is_empty());

            if editing {
                let mut form = view.form();
                for skill in &add_skill {
                    form.skills.add(skill);
                }
                for skill in &remove_skill {
                    form.skills.remove(skill);
                }
                for goal in &add_goal {
                    form.goals.add(goal);
                }
                for industry in &add_industry {
                    form.industries.add(industry);
                }
                println!("{}", view.save(&form).await);
            }

            match &view.profile {
                Some(profile) => {
                    println!("Name:       {}", profile.name);
                    if let Some(email) = &profile.email {
                        println!("Email:      {}", email);
                    }
                    println!("Skills:     {}", profile.skills.join(", "));
                    println!("Goals:      {}", profile.goals.join(", "));
                    println!("Industries: {}", profile.preferred_industries.join(", "));
                }
                None => println!("Profile unavailable"),
            }
        }
        Commands::Admin(cmd) => run_admin(client, cmd).await,
        Commands::Level { .. } => {}
    }

    info!("Done");
    Ok(())
}

async fn run_admin(client: Arc<ApiClient>, cmd: AdminCommands) {
    let mut console = AdminConsole::load(client).await;

    match cmd {
        AdminCommands::Stats => {
            let s = console.stats;
            println!("Users:        {}", s.total_users);
            println!("Courses:      {}", s.total_courses);
            println!("Communities:  {} ({} pending)", s.total_communities, s.pending_communities);
            println!("Progress:     {}", s.total_progress);
            println!("Achievements: {}", s.total_achievements);
        }
        AdminCommands::Pending => {
            for community in &console.pending {
                println!("{} {} [{}]", community.id, community.name, community.category);
            }
        }
        AdminCommands::Approve { community_id } => {
            println!("{}", console.approve_community(&community_id).await);
        }
        AdminCommands::DeleteCourse { course_id } => {
            println!("{}", console.delete_course(&course_id).await);
        }
        AdminCommands::Registrations => match console.course_registrations().await {
            Some(data) => {
                println!(
                    "{} registrations by {} users across {} courses",
                    data.summary.total_registrations,
                    data.summary.total_unique_users,
                    data.summary.total_courses
                );
                for course in &data.courses {
                    println!(
                        "  {:<40} {:>5} ({} users)",
                        course.course_title, course.total_registrations, course.unique_users
                    );
                }
            }
            None => println!("Registrations unavailable"),
        },
    }
}

fn print_level(summary: &careerpath_client::LevelSummary) {
    match summary.remaining() {
        Some(remaining) => println!(
            "Level {} ({:.0}%, {} XP to next)",
            summary.level, summary.progress_percent, remaining
        ),
        None => println!("Level {} (max)", summary.level),
    }
}

fn print_badge(badge: &AchievementBadge) {
    println!("{} {} (+{} XP)", badge.icon, badge.title, badge.score_reward);
    if let Some(description) = &badge.description {
        println!("    {}", description);
    }
}

fn parse_category(label: Option<&str>) -> anyhow::Result<Option<Category>> {
    label
        .map(|l| Category::from_label(l).ok_or_else(|| anyhow::anyhow!("unknown category: {}", l)))
        .transpose()
}

fn parse_level(label: Option<&str>) -> anyhow::Result<Option<CourseLevel>> {
    label
        .map(|l| CourseLevel::from_label(l).ok_or_else(|| anyhow::anyhow!("unknown level: {}", l)))
        .transpose()
}
