use crate::domain::{CanonicalPlayer, RawRow};
use crate::error::{PropError, Result};
use crate::loaders::fields;
use std::future::Future;
use tracing::{info, warn};

/// Load a season's roster, falling back once to the prior season.
///
/// Early in the offseason the new roster file is not yet published. A
/// failed fallback (or a season at the floor) is reported as
/// [`PropError::NoRosterData`]. Returns the season actually loaded.
pub async fn load_roster_prefer_current<F, Fut, R>(
    season: i32,
    floor: i32,
    fetch: F,
) -> Result<(i32, R)>
where
    F: Fn(i32) -> Fut,
    Fut: Future<Output = Result<R>>,
{
    match fetch(season).await {
        Ok(rows) => Ok((season, rows)),
        Err(err) if season > floor => {
            warn!(season, error = %err, "roster unavailable, falling back to prior season");
            match fetch(season - 1).await {
                Ok(rows) => {
                    info!(season = season - 1, "using prior season roster");
                    Ok((season - 1, rows))
                }
                Err(err) => {
                    warn!(season = season - 1, error = %err, "fallback roster unavailable");
                    Err(PropError::NoRosterData { season, floor })
                }
            }
        }
        Err(err) => {
            warn!(season, floor, error = %err, "roster unavailable at floor season");
            Err(PropError::NoRosterData { season, floor })
        }
    }
}

/// Lower-case, non-alphanumeric runs become `-`, edges trimmed.
pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    let mut pending_dash = false;
    for c in s.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Quarterbacks from raw roster rows.
///
/// `is_starter` stays false: the roster file has no depth chart.
pub fn extract_qbs(rows: &[RawRow]) -> Vec<CanonicalPlayer> {
    rows.iter()
        .filter(|r| {
            fields::POSITION
                .text(r)
                .is_some_and(|p| p.eq_ignore_ascii_case("QB"))
        })
        .map(to_canonical)
        .collect()
}

fn to_canonical(row: &RawRow) -> CanonicalPlayer {
    let first = fields::FIRST_NAME.text(row).unwrap_or_default();
    let last = fields::LAST_NAME.text(row).unwrap_or_default();
    let slug = slugify(&format!("{last}-{first}"));

    let id = fields::ROSTER_ID
        .text(row)
        .map(str::to_string)
        .unwrap_or_else(|| slug.clone());

    let name = fields::FULL_NAME
        .text(row)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{first} {last}"))
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let is_active = fields::STATUS
        .text(row)
        .is_some_and(|s| s.eq_ignore_ascii_case("ACT"));

    CanonicalPlayer {
        id,
        slug,
        name,
        team_abbr: fields::ROSTER_TEAM.text(row).unwrap_or_default().to_string(),
        is_active,
        is_starter: false,
    }
}
