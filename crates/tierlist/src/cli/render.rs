use colored::Colorize;
use tierlistapp::catalog::CatalogIndex;
use tierlistapp::filter::{HeroFilter, RoleState};
use tierlistapp::model::{CategoryMode, EntryId, Tier};
use tierlistapp::reorder::{Board, ContainerId};
use tierlistapp::share::ShareLink;

const TIER_LABEL_WIDTH: usize = 4;
const EMPTY_MARKER: &str = "-";

fn entry_label(catalog: &CatalogIndex, id: &EntryId, filter: &HeroFilter) -> String {
    match catalog.get(id) {
        Some(entry) if filter.is_visible(entry) => entry.name.clone(),
        Some(entry) => entry.name.dimmed().to_string(),
        None => id.dimmed().to_string(),
    }
}

fn tier_label(tier: Tier) -> String {
    let label = format!("{:<width$}", tier.as_str(), width = TIER_LABEL_WIDTH);
    match tier {
        Tier::S => label.red().bold().to_string(),
        Tier::A => label.yellow().bold().to_string(),
        Tier::B => label.green().bold().to_string(),
        Tier::C => label.cyan().bold().to_string(),
        Tier::D => label.blue().bold().to_string(),
    }
}

fn row(catalog: &CatalogIndex, ids: &[EntryId], filter: &HeroFilter) -> String {
    if ids.is_empty() {
        return EMPTY_MARKER.dimmed().to_string();
    }
    ids.iter()
        .map(|id| entry_label(catalog, id, filter))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Tier rows, then the bank. Tier entries hidden by the filter are dimmed.
pub(super) fn render_board(
    catalog: &CatalogIndex,
    mode: CategoryMode,
    board: &Board,
    filter: &HeroFilter,
) -> String {
    let mut out = format!("{}\n\n", mode.label().bold());
    for tier in Tier::ALL {
        let ids = board.container(ContainerId::Tier(tier));
        out.push_str(&format!("{}{}\n", tier_label(tier), row(catalog, ids, filter)));
    }
    let bank = board.container(ContainerId::Bank);
    out.push_str(&format!(
        "\n{} {}\n",
        "Bank".bold(),
        format!("({})", bank.len()).dimmed()
    ));
    out.push_str(&format!("    {}\n", row(catalog, bank, filter)));
    out
}

pub(super) fn render_changed(changed: &[Tier]) -> String {
    if changed.is_empty() {
        return "Nothing changed.".dimmed().to_string();
    }
    let tiers: Vec<&str> = changed.iter().map(|t| t.as_str()).collect();
    format!("Updated {}.", tiers.join(", ")).green().to_string()
}

pub(super) fn render_link(link: &ShareLink, wanted_short: bool) -> String {
    if wanted_short && !link.shortened {
        format!(
            "{}\n{}",
            link.url,
            "Shortening failed, showing the full link.".yellow()
        )
    } else {
        link.url.clone()
    }
}

fn role_marker(state: RoleState) -> String {
    match state {
        RoleState::All => "[x]".green().to_string(),
        RoleState::Mixed => "[~]".yellow().to_string(),
        RoleState::None => "[ ]".dimmed().to_string(),
    }
}

/// Role headers with their tri-state, one line per hero underneath.
pub(super) fn render_filters(catalog: &CatalogIndex, filter: &HeroFilter) -> String {
    let mut out = String::new();
    for (role, heroes) in catalog.roles() {
        let state = filter.role_state(catalog.roles(), role);
        out.push_str(&format!("{} {}\n", role_marker(state), role.bold()));
        for hero in heroes {
            let mark = if filter.is_hero_enabled(Some(hero)) {
                "x"
            } else {
                " "
            };
            out.push_str(&format!("    [{}] {}\n", mark, hero.trim()));
        }
    }
    let universal = if filter.universal { "x" } else { " " };
    out.push_str(&format!("[{}] {}\n", universal, "Universal".bold()));
    out
}
