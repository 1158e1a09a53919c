//! `vigil` command-line client for the case publishing API.
//!
//! Drives the same `casesite` client and gateway as the browser build, with a
//! `reqwest` transport and tokens taken from flags or the environment. Every
//! command prints the backend's JSON response to stdout; logs go to stderr.

mod input;
mod transport;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use casesite::{
    ApiClient, CaseGateway, CustomizationStore, MemoryTokens, SiteError, SpotlightDraft, Template, TokenStore,
    case_payload, editable_zones,
};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::{Value, json};

use crate::input::{case_input, deploy_target, field_pairs, health_url, normalize_base_url, read_upload};
use crate::transport::ReqwestTransport;

type Api = ApiClient<ReqwestTransport, Arc<MemoryTokens>>;

const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(3);
const MAX_STATUS_POLLS: u32 = 40;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Site(#[from] SiteError),
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{0}")]
    InvalidInput(String),
    #[error("reading input failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("not signed in; run `vigil login` or set VIGIL_ACCESS_TOKEN")]
    MissingToken,
    #[error("no template with id `{0}`")]
    UnknownTemplate(String),
    #[error("health check failed with HTTP {0}")]
    Unhealthy(u16),
}

#[derive(Parser, Debug)]
#[command(name = "vigil", about = "Case memorial site publishing CLI")]
struct Cli {
    #[arg(long, env = "VIGIL_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "VIGIL_ACCESS_TOKEN")]
    access_token: Option<String>,

    #[arg(long, env = "VIGIL_REFRESH_TOKEN")]
    refresh_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the web server is up.
    Ping,
    /// Exchange credentials for a token pair.
    Login {
        username: String,
        #[arg(long, env = "VIGIL_PASSWORD")]
        password: String,
    },
    Templates(TemplatesCommand),
    Cases(CasesCommand),
    /// Publish a saved case under a subdomain or a custom domain.
    Deploy {
        case_id: String,
        #[arg(long, conflicts_with = "custom_domain", required_unless_present = "custom_domain")]
        subdomain: Option<String>,
        #[arg(long)]
        custom_domain: Option<String>,
        /// Poll until the deployment is active or failed.
        #[arg(long, default_value_t = false)]
        wait: bool,
    },
    /// Show the current deployment of a case.
    Status { case_id: String },
    Photos(PhotosCommand),
    Spotlight(SpotlightCommand),
    Profile(ProfileCommand),
}

#[derive(Args, Debug)]
struct TemplatesCommand {
    #[command(subcommand)]
    command: TemplatesSubcommand,
}

#[derive(Subcommand, Debug)]
enum TemplatesSubcommand {
    List,
    /// Print a template with its editable zones.
    Show { template_id: String },
    Compare {
        #[arg(required = true, num_args = 2..)]
        template_ids: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct CasesCommand {
    #[command(subcommand)]
    command: CasesSubcommand,
}

#[derive(Subcommand, Debug)]
enum CasesSubcommand {
    List,
    Stats,
    Show {
        case_id: String,
    },
    /// Create or update a case from a JSON file of case fields.
    Save {
        file: PathBuf,
        /// Update this case instead of creating one.
        #[arg(long)]
        id: Option<String>,
        /// Template to save with; overrides `template_id` in the file.
        #[arg(long)]
        template: Option<String>,
    },
    Delete {
        case_id: String,
    },
}

#[derive(Args, Debug)]
struct PhotosCommand {
    #[command(subcommand)]
    command: PhotosSubcommand,
}

#[derive(Subcommand, Debug)]
enum PhotosSubcommand {
    List {
        case_id: String,
    },
    Upload {
        case_id: String,
        file: PathBuf,
        #[arg(long)]
        caption: Option<String>,
    },
    /// Set the display order; pass every photo id of the case.
    Reorder {
        case_id: String,
        #[arg(required = true)]
        photo_ids: Vec<String>,
    },
    Delete {
        photo_id: String,
    },
}

#[derive(Args, Debug)]
struct SpotlightCommand {
    #[command(subcommand)]
    command: SpotlightSubcommand,
}

#[derive(Subcommand, Debug)]
enum SpotlightSubcommand {
    List {
        #[arg(long)]
        case: Option<String>,
    },
    Create {
        #[arg(long)]
        case: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    Update {
        post_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    Publish {
        post_id: String,
    },
    /// Schedule publication at an RFC 3339 timestamp.
    Schedule {
        post_id: String,
        when: String,
    },
    Delete {
        post_id: String,
    },
}

#[derive(Args, Debug)]
struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProfileSubcommand {
    Show,
    Update {
        /// Repeated `key=value` profile fields.
        #[arg(long = "field")]
        fields: Vec<String>,
        #[arg(long)]
        avatar: Option<PathBuf>,
    },
}

struct CliContext {
    api_root: String,
    api: Arc<Api>,
    tokens: Arc<MemoryTokens>,
    initial_access: Option<String>,
}

impl CliContext {
    fn require_session(&self) -> Result<(), CliError> {
        if self.tokens.access_token().is_none() && self.tokens.refresh_token().is_none() {
            return Err(CliError::MissingToken);
        }
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let api_root = normalize_base_url(&cli.base_url)?;
    let tokens = Arc::new(MemoryTokens::new(cli.access_token.clone(), cli.refresh_token));
    let api = Arc::new(ApiClient::new(ReqwestTransport::new(api_root.clone()), Arc::clone(&tokens)));
    let ctx = CliContext { api_root, api, tokens, initial_access: cli.access_token };
    let is_login = matches!(cli.command, Command::Login { .. });

    let result = match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Login { username, password } => run_login(&ctx, &username, &password).await,
        Command::Templates(cmd) => run_templates(&ctx, cmd).await,
        Command::Cases(cmd) => run_cases(&ctx, cmd).await,
        Command::Deploy { case_id, subdomain, custom_domain, wait } => {
            run_deploy(&ctx, case_id, subdomain, custom_domain, wait).await
        }
        Command::Status { case_id } => {
            ctx.require_session()?;
            let gateway = CaseGateway::for_case(Arc::clone(&ctx.api), case_id);
            print_json(&gateway.deployment_status().await?)
        }
        Command::Photos(cmd) => run_photos(&ctx, cmd).await,
        Command::Spotlight(cmd) => run_spotlight(&ctx, cmd).await,
        Command::Profile(cmd) => run_profile(&ctx, cmd).await,
    };

    if !is_login {
        report_refreshed_token(&ctx);
    }
    result
}

/// The client refreshes silently; surface the new token so the caller can
/// keep using it.
fn report_refreshed_token(ctx: &CliContext) {
    let current = ctx.tokens.access_token();
    if current.is_some() && current != ctx.initial_access {
        if let Some(token) = current {
            tracing::info!(access_token = %token, "access token refreshed; update VIGIL_ACCESS_TOKEN");
        }
    }
}

async fn run_ping(ctx: &CliContext) -> Result<(), CliError> {
    let response = reqwest::Client::new().get(health_url(&ctx.api_root)).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Unhealthy(status.as_u16()));
    }
    println!("ok");
    Ok(())
}

async fn run_login(ctx: &CliContext, username: &str, password: &str) -> Result<(), CliError> {
    ctx.api.login(username, password).await?;
    print_json(&json!({
        "access": ctx.tokens.access_token(),
        "refresh": ctx.tokens.refresh_token(),
    }))
}

async fn run_templates(ctx: &CliContext, cmd: TemplatesCommand) -> Result<(), CliError> {
    ctx.require_session()?;
    match cmd.command {
        TemplatesSubcommand::List => print_json(&ctx.api.templates().await?),
        TemplatesSubcommand::Show { template_id } => {
            let template = find_template(&ctx.api, &template_id).await?;
            let zones = editable_zones(&template);
            print_json(&json!({ "template": template, "zones": zones }))
        }
        TemplatesSubcommand::Compare { template_ids } => {
            let ids: Vec<&str> = template_ids.iter().map(String::as_str).collect();
            print_json(&ctx.api.compare_templates(&ids).await?)
        }
    }
}

/// Listed template with its schema filled in.
async fn find_template(api: &Api, id: &str) -> Result<Template, CliError> {
    let template = api
        .templates()
        .await?
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| CliError::UnknownTemplate(id.to_owned()))?;
    Ok(api.ensure_schema(template).await?)
}

async fn run_cases(ctx: &CliContext, cmd: CasesCommand) -> Result<(), CliError> {
    ctx.require_session()?;
    match cmd.command {
        CasesSubcommand::List => print_json(&ctx.api.my_cases().await?),
        CasesSubcommand::Stats => print_json(&ctx.api.case_stats().await?),
        CasesSubcommand::Show { case_id } => print_json(&ctx.api.get_case(&case_id).await?),
        CasesSubcommand::Save { file, id, template } => {
            let raw = std::fs::read_to_string(&file)?;
            let input = case_input(&serde_json::from_str::<Value>(&raw)?)?;

            let template = match template.or(input.template_id) {
                Some(template_id) => Some(find_template(&ctx.api, &template_id).await?),
                None => None,
            };
            let customizations = match &template {
                Some(template) => CustomizationStore::from_saved(template, input.customizations.as_ref()).values().clone(),
                None => input.customizations.unwrap_or_else(|| json!({})),
            };

            let gateway = match id {
                Some(id) => CaseGateway::for_case(Arc::clone(&ctx.api), id),
                None => CaseGateway::new(Arc::clone(&ctx.api)),
            };
            tracing::debug!(payload = %case_payload(&input.form, template.as_ref(), &customizations), "saving case");
            let record = gateway.save(&input.form, template.as_ref(), &customizations).await?;
            print_json(&record)
        }
        CasesSubcommand::Delete { case_id } => {
            CaseGateway::for_case(Arc::clone(&ctx.api), case_id.clone()).delete().await?;
            print_json(&json!({ "deleted": case_id }))
        }
    }
}

async fn run_deploy(
    ctx: &CliContext,
    case_id: String,
    subdomain: Option<String>,
    custom_domain: Option<String>,
    wait: bool,
) -> Result<(), CliError> {
    ctx.require_session()?;
    let target = deploy_target(subdomain, custom_domain);
    let gateway = CaseGateway::for_case(Arc::clone(&ctx.api), case_id);

    let mut deployment = gateway.deploy(&target).await?;
    if wait {
        let mut polls = 0;
        while !deployment.is_terminal() && polls < MAX_STATUS_POLLS {
            tokio::time::sleep(STATUS_POLL_INTERVAL).await;
            polls += 1;
            match gateway.deployment_status().await {
                Ok(next) => deployment = next,
                Err(err) if err.retryable() => {
                    tracing::warn!(%err, polls, "status check failed; retrying");
                    continue;
                }
                Err(err) => return Err(err.into()),
            }
            tracing::info!(status = ?deployment.status, polls, "deployment status");
        }
    }
    print_json(&deployment)
}

async fn run_photos(ctx: &CliContext, cmd: PhotosCommand) -> Result<(), CliError> {
    ctx.require_session()?;
    match cmd.command {
        PhotosSubcommand::List { case_id } => print_json(&ctx.api.photos(&case_id).await?),
        PhotosSubcommand::Upload { case_id, file, caption } => {
            let upload = read_upload(&file)?;
            print_json(&ctx.api.upload_photo(&case_id, upload, caption.as_deref()).await?)
        }
        PhotosSubcommand::Reorder { case_id, photo_ids } => {
            ctx.api.reorder_photos(&case_id, &photo_ids).await?;
            print_json(&json!({ "case": case_id, "photo_ids": photo_ids }))
        }
        PhotosSubcommand::Delete { photo_id } => {
            ctx.api.delete_photo(&photo_id).await?;
            print_json(&json!({ "deleted": photo_id }))
        }
    }
}

async fn run_spotlight(ctx: &CliContext, cmd: SpotlightCommand) -> Result<(), CliError> {
    ctx.require_session()?;
    match cmd.command {
        SpotlightSubcommand::List { case } => print_json(&ctx.api.spotlight_posts(case.as_deref()).await?),
        SpotlightSubcommand::Create { case, title, content } => {
            let draft = SpotlightDraft { case: Some(case), title: Some(title), content: Some(content) };
            print_json(&ctx.api.create_spotlight_post(&draft).await?)
        }
        SpotlightSubcommand::Update { post_id, title, content } => {
            let draft = SpotlightDraft { case: None, title, content };
            print_json(&ctx.api.update_spotlight_post(&post_id, &draft).await?)
        }
        SpotlightSubcommand::Publish { post_id } => print_json(&ctx.api.publish_spotlight_post(&post_id).await?),
        SpotlightSubcommand::Schedule { post_id, when } => {
            print_json(&ctx.api.schedule_spotlight_post(&post_id, &when).await?)
        }
        SpotlightSubcommand::Delete { post_id } => {
            ctx.api.delete_spotlight_post(&post_id).await?;
            print_json(&json!({ "deleted": post_id }))
        }
    }
}

async fn run_profile(ctx: &CliContext, cmd: ProfileCommand) -> Result<(), CliError> {
    ctx.require_session()?;
    match cmd.command {
        ProfileSubcommand::Show => print_json(&ctx.api.profile().await?),
        ProfileSubcommand::Update { fields, avatar } => {
            let fields = field_pairs(&fields)?;
            let avatar = avatar.as_deref().map(read_upload).transpose()?;
            print_json(&ctx.api.update_profile(fields, avatar).await?)
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
