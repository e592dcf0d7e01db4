use super::render::{render_board, render_changed, render_filters, render_link};
use super::setup::{Cli, Commands, FilterCommands};
use clap::Parser;
use tierlistapp::error::{Result, TierError};
use tierlistapp::init::{initialize, TierlistContext};
use tierlistapp::model::CategoryMode;
use tierlistapp::reorder::ContainerId;
use tierlistapp::share::Shortener;
use tierlistapp::store::backend::StateBackend;
use tierlistapp::store::persisted::{FILTER_KEY, STATE_KEY};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "tierlist=warn,tierlistapp=warn";
const VERBOSE_LOG_FILTER: &str = "tierlist=debug,tierlistapp=debug";

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };
    // stdout carries command output only.
    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
    {
        debug!(error = %e, "tracing subscriber already installed");
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = initialize(cli.data, cli.catalog)?;
    debug!(
        data = %ctx.data_dir.display(),
        state = %ctx.api.backend().location(STATE_KEY).display(),
        filters = %ctx.api.backend().location(FILTER_KEY).display(),
        "context ready"
    );

    match cli.command {
        Some(Commands::Show { mode }) => handle_show(&ctx, mode),
        Some(Commands::Mode { mode }) => handle_mode(&mut ctx, mode),
        Some(Commands::Place {
            entry,
            target,
            before,
        }) => handle_place(&mut ctx, &entry, target, before.as_deref()),
        Some(Commands::Reset) => handle_reset(&mut ctx),
        Some(Commands::Share { shorten }) => handle_share(&ctx, shorten),
        Some(Commands::Load { url }) => handle_load(&mut ctx, &url),
        Some(Commands::Filter { action }) => handle_filter(&mut ctx, action),
        None => handle_show(&ctx, None),
    }
}

fn handle_show(ctx: &TierlistContext, mode: Option<CategoryMode>) -> Result<()> {
    let api = &ctx.api;
    let mode = mode.unwrap_or_else(|| api.mode());
    let board = api.board_for(mode);
    let filter = api.session().filters.get(mode);
    print!("{}", render_board(api.catalog(), mode, &board, filter));
    Ok(())
}

fn handle_mode(ctx: &mut TierlistContext, mode: CategoryMode) -> Result<()> {
    if !ctx.api.switch_mode(mode) {
        debug!(%mode, "mode already active");
    }
    handle_show(ctx, None)
}

fn handle_place(
    ctx: &mut TierlistContext,
    entry: &str,
    target: ContainerId,
    before: Option<&str>,
) -> Result<()> {
    let changed = ctx.api.place(entry, target, before)?;
    println!("{}", render_changed(&changed));
    Ok(())
}

fn handle_reset(ctx: &mut TierlistContext) -> Result<()> {
    ctx.api.reset();
    handle_show(ctx, None)
}

fn handle_share(ctx: &TierlistContext, shorten: bool) -> Result<()> {
    let wanted_short = shorten || ctx.config.shorten_links;
    let shortener = ctx.config.shortener();
    let shortener: Option<&dyn Shortener> = wanted_short.then_some(&shortener as &dyn Shortener);
    let link = ctx.api.share_link(shortener)?;
    println!("{}", render_link(&link, wanted_short));
    Ok(())
}

fn handle_load(ctx: &mut TierlistContext, url: &str) -> Result<()> {
    if !ctx.api.load_fragment(url)? {
        return Err(TierError::NotFound(format!(
            "no share token in '{}' (expected '#s=...')",
            url
        )));
    }
    handle_show(ctx, None)
}

fn handle_filter(ctx: &mut TierlistContext, action: FilterCommands) -> Result<()> {
    match action {
        FilterCommands::Hero { name, state } => ctx.api.set_hero_filter(&name, state.is_on())?,
        FilterCommands::Role { role, state } => ctx.api.set_role_filter(&role, state.is_on())?,
        FilterCommands::Universal { state } => ctx.api.set_universal_filter(state.is_on()),
        FilterCommands::All { state } => ctx.api.set_all_filters(state.is_on()),
    }
    print!("{}", render_filters(ctx.api.catalog(), ctx.api.filter()));
    Ok(())
}
