//! Human-readable rendering of the flag cache.

use dp_common::FlagCache;
use std::fmt::Write;

/// Render the cache as an aligned group listing.
pub fn render_text(cache: &FlagCache) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "host: {} {} | groups: {}",
        cache.host.os,
        cache.host.arch,
        cache.groups.len()
    );

    let width = cache
        .groups
        .names()
        .map(str::len)
        .max()
        .unwrap_or(0);

    for (name, group) in cache.groups.iter() {
        let _ = writeln!(out, "  {:width$}  {}", name, group.flags.join(" "));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dp_common::{FlagGroup, FlagTable, HostInfo, OsFamily};

    #[test]
    fn test_render_lists_groups_with_flags() {
        let mut groups = FlagTable::new();
        groups.insert("mad", FlagGroup::new(vec!["-lmad".to_string()]));
        groups.insert(
            "glib",
            FlagGroup::new(vec!["-I/usr/include/glib-2.0".to_string(), "-lglib-2.0".to_string()]),
        );
        let cache = FlagCache::new(
            HostInfo {
                os: OsFamily::Linux,
                arch: "x86_64".to_string(),
            },
            groups,
        );

        let text = render_text(&cache);
        assert!(text.contains("groups: 2"));
        assert!(text.contains("mad"));
        assert!(text.contains("-lglib-2.0"));
    }

    #[test]
    fn test_render_empty_table() {
        let cache = FlagCache::new(
            HostInfo {
                os: OsFamily::Linux,
                arch: "x86_64".to_string(),
            },
            FlagTable::new(),
        );
        assert!(render_text(&cache).contains("groups: 0"));
    }
}
