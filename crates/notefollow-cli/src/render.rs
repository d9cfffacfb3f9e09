use notefollow_core::view::{format_count, format_signed};
use notefollow_core::{Creator, DashboardView};

/// Profile preview shown before tracking starts.
pub(crate) fn creator_preview(creator: &Creator) -> String {
    format!(
        "{} (@{})\nfollowers: {}\n",
        creator.nickname,
        creator.urlname,
        format_count(creator.follower_count)
    )
}

/// Stats block followed by the recent-records table, newest first.
pub(crate) fn dashboard(view: &DashboardView) -> String {
    let stats = &view.stats;
    let mut lines = vec![
        format!("{} (@{})", view.profile.nickname, view.profile.urlname),
        view.profile_url.clone(),
        String::new(),
        format!("{:<12}{}", "FOLLOWERS", format_count(stats.current)),
        format!("{:<12}{}", "TODAY", format_signed(stats.daily)),
        format!("{:<12}{}", "7 DAYS", format_signed(stats.weekly)),
        format!("{:<12}{}", "30 DAYS", format_signed(stats.monthly)),
        format!("{:<12}{}", "TOTAL", format_signed(stats.total)),
        String::new(),
    ];

    if view.recent.is_empty() {
        lines.push("no records yet; run `notefollow refresh`".to_string());
    } else {
        lines.push(format!("{:<12}{:>12}{:>10}", "DATE", "FOLLOWERS", "CHANGE"));
        lines.extend(view.recent.iter().map(|record| {
            format!(
                "{:<12}{:>12}{:>10}",
                record.date.to_string(),
                format_count(record.followers),
                format_signed(record.change)
            )
        }));
    }

    if let Some(at) = view.last_updated {
        lines.push(String::new());
        lines.push(format!("last updated {}", at.format("%Y-%m-%d %H:%M")));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
