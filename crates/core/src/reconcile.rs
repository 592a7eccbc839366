//! Merges the two announcement sources: the inline payload list and the
//! dedicated incident feed. The feed is authoritative when present and
//! non-empty; inline items the feed omits are preserved.

use crate::models::Announcement;
use std::collections::HashSet;

/// Merge-by-id of inline announcements with the incident feed.
///
/// An empty feed passes `existing` through unchanged. Otherwise the result
/// follows feed order: feed items sharing a non-null id with an inline item
/// are overlaid onto the inline copy (feed wins on conflicts), unmatched
/// feed items pass through as-is, and inline items whose id never appeared
/// in the feed are appended after. Id-less items on either side are always
/// treated as distinct, so they can duplicate across refresh cycles.
pub fn merge_announcements(existing: &[Announcement], feed: &[Announcement]) -> Vec<Announcement> {
    if feed.is_empty() {
        return existing.to_vec();
    }

    let mut feed_ids: HashSet<&str> = HashSet::new();
    let mut merged = Vec::with_capacity(feed.len() + existing.len());

    for item in feed {
        match item.id.as_deref() {
            Some(id) => {
                feed_ids.insert(id);
                let inline = existing
                    .iter()
                    .find(|candidate| candidate.id.as_deref() == Some(id));
                match inline {
                    Some(inline) => merged.push(overlay(inline, item)),
                    None => merged.push(item.clone()),
                }
            }
            None => merged.push(item.clone()),
        }
    }

    for item in existing {
        let unmatched = match item.id.as_deref() {
            Some(id) => !feed_ids.contains(id),
            None => true,
        };
        if unmatched {
            merged.push(item.clone());
        }
    }

    merged
}

/// Feed fields win wherever the feed actually carries a value; empty or
/// absent feed fields keep the inline value, matching the upstream overlay
/// where absent keys never overwrite.
fn overlay(inline: &Announcement, feed: &Announcement) -> Announcement {
    Announcement {
        id: feed.id.clone().or_else(|| inline.id.clone()),
        title: pick_text(&feed.title, &inline.title),
        kind: feed.kind.or(inline.kind),
        status: pick_text(&feed.status, &inline.status),
        summary: pick_opt(&feed.summary, &inline.summary),
        starts_at: pick_opt(&feed.starts_at, &inline.starts_at),
        ends_at: pick_opt(&feed.ends_at, &inline.ends_at),
        resolved_at: pick_opt(&feed.resolved_at, &inline.resolved_at),
        published: feed.published.or(inline.published),
        region: pick_opt(&feed.region, &inline.region),
        service_ids: pick_list(&feed.service_ids, &inline.service_ids),
        group_ids: pick_list(&feed.group_ids, &inline.group_ids),
        label_ids: pick_list(&feed.label_ids, &inline.label_ids),
        entries: if feed.entries.is_empty() {
            inline.entries.clone()
        } else {
            feed.entries.clone()
        },
    }
}

fn pick_text(feed: &str, inline: &str) -> String {
    if feed.is_empty() {
        inline.to_owned()
    } else {
        feed.to_owned()
    }
}

fn pick_opt(feed: &Option<String>, inline: &Option<String>) -> Option<String> {
    feed.clone().or_else(|| inline.clone())
}

fn pick_list(feed: &[String], inline: &[String]) -> Vec<String> {
    if feed.is_empty() {
        inline.to_vec()
    } else {
        feed.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnnouncementKind, Entry};

    fn announcement(id: Option<&str>, title: &str) -> Announcement {
        Announcement {
            id: id.map(str::to_owned),
            title: title.to_owned(),
            status: "investigating".to_owned(),
            ..Announcement::default()
        }
    }

    #[test]
    fn empty_feed_passes_existing_through_unchanged() {
        let existing = vec![announcement(Some("a"), "inline")];
        let merged = merge_announcements(&existing, &[]);
        assert_eq!(merged, existing);
    }

    #[test]
    fn matching_id_produces_exactly_one_merged_item() {
        let existing = vec![Announcement {
            summary: Some("inline summary".to_owned()),
            ..announcement(Some("a"), "inline title")
        }];
        let feed = vec![Announcement {
            status: "identified".to_owned(),
            ..announcement(Some("a"), "feed title")
        }];

        let merged = merge_announcements(&existing, &feed);
        assert_eq!(merged.len(), 1);

        let item = match merged.first() {
            Some(item) => item,
            None => return,
        };
        // feed wins where it carries values
        assert_eq!(item.title, "feed title");
        assert_eq!(item.status, "identified");
        // inline fields the feed omitted survive
        assert_eq!(item.summary.as_deref(), Some("inline summary"));
    }

    #[test]
    fn absent_feed_kind_and_published_keep_inline_values() {
        let existing = vec![Announcement {
            kind: Some(AnnouncementKind::Maintenance),
            published: Some(false),
            ..announcement(Some("a"), "inline title")
        }];
        let feed = vec![Announcement {
            status: "in_progress".to_owned(),
            ..announcement(Some("a"), "feed title")
        }];

        let merged = merge_announcements(&existing, &feed);
        let item = match merged.first() {
            Some(item) => item,
            None => return,
        };
        // the feed omitted type/published, so the inline values survive
        assert_eq!(item.kind(), AnnouncementKind::Maintenance);
        assert!(!item.is_published());
        assert_eq!(item.status, "in_progress");
        assert_eq!(item.title, "feed title");
    }

    #[test]
    fn explicit_feed_kind_and_published_overwrite_inline_values() {
        let existing = vec![Announcement {
            kind: Some(AnnouncementKind::Maintenance),
            published: Some(false),
            ..announcement(Some("a"), "inline title")
        }];
        let feed = vec![Announcement {
            kind: Some(AnnouncementKind::Incident),
            published: Some(true),
            ..announcement(Some("a"), "feed title")
        }];

        let merged = merge_announcements(&existing, &feed);
        let item = match merged.first() {
            Some(item) => item,
            None => return,
        };
        assert_eq!(item.kind(), AnnouncementKind::Incident);
        assert!(item.is_published());
    }

    #[test]
    fn feed_order_first_then_leftover_inline_items() {
        let existing = vec![
            announcement(Some("a"), "inline a"),
            announcement(Some("b"), "inline b"),
        ];
        let feed = vec![
            announcement(Some("c"), "feed c"),
            announcement(Some("b"), "feed b"),
        ];

        let merged = merge_announcements(&existing, &feed);
        let titles: Vec<&str> = merged.iter().map(|item| item.title.as_str()).collect();
        assert_eq!(titles, vec!["feed c", "feed b", "inline a"]);
    }

    #[test]
    fn idless_items_are_never_matched() {
        let existing = vec![announcement(None, "inline anonymous")];
        let feed = vec![announcement(None, "feed anonymous")];

        let merged = merge_announcements(&existing, &feed);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn merge_is_idempotent_for_identical_sources() {
        let existing = vec![announcement(Some("a"), "title")];
        let once = merge_announcements(&existing, &existing);
        let twice = merge_announcements(&once, &existing);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 1);
    }

    #[test]
    fn feed_entries_replace_inline_entries_wholesale() {
        let existing = vec![Announcement {
            entries: vec![Entry {
                message: "old update".to_owned(),
                ..Entry::default()
            }],
            ..announcement(Some("a"), "title")
        }];
        let feed = vec![Announcement {
            entries: vec![
                Entry {
                    message: "new update".to_owned(),
                    ..Entry::default()
                },
                Entry {
                    message: "newer update".to_owned(),
                    ..Entry::default()
                },
            ],
            ..announcement(Some("a"), "title")
        }];

        let merged = merge_announcements(&existing, &feed);
        let entries = merged.first().map(|item| item.entries.len());
        assert_eq!(entries, Some(2));
    }
}
