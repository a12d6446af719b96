//! Built-in probe manifest.
//!
//! The fixed, ordered list of capabilities the build needs, plus the
//! platform-conditional groups that are registered without probing.

use crate::probe::ProbeSpec;
use dp_common::OsFamily;

/// A flag group registered unconditionally on one OS family.
#[derive(Debug, Clone)]
pub struct PlatformGroup {
    pub name: String,
    pub os: OsFamily,
    pub flags: Vec<String>,
}

/// Ordered probe descriptors plus platform-conditional groups.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub probes: Vec<ProbeSpec>,
    pub platform_groups: Vec<PlatformGroup>,
}

impl Manifest {
    /// The capabilities the player and its plugins are built against.
    pub fn builtin() -> Self {
        let probes = vec![
            // Essential libraries; configuration aborts without these.
            ProbeSpec::flag_query("mad", "pkg-config", &["--libs", "--cflags", "mad"]).required(),
            ProbeSpec::flag_query(
                "glib",
                "pkg-config",
                &["--libs", "--cflags", "gthread-2.0", "glib-2.0", "gmodule-2.0"],
            )
            .required(),
            ProbeSpec::flag_query("dbus", "pkg-config", &["--libs", "--cflags", "dbus-1"])
                .required(),
            ProbeSpec::flag_query(
                "dbusglib",
                "pkg-config",
                &["--libs", "--cflags", "dbus-1", "dbus-glib-1"],
            )
            .required(),
            // Optional libraries; plugins needing them are simply not built.
            ProbeSpec::flag_query("qt", "pkg-config", &["--libs", "--cflags", "qt"]),
            ProbeSpec::flag_query("shout", "pkg-config", &["--libs", "--cflags", "shout"]),
            ProbeSpec::flag_query("curl", "curl-config", &["--libs", "--cflags"]),
            ProbeSpec::flag_query("sdl", "sdl-config", &["--libs", "--cflags"]),
            ProbeSpec::library("sdl-ttf", "SDL_ttf", "TTF_Init").depends_on("sdl"),
            ProbeSpec::library("vorbis", "vorbis", "ogg_sync_init"),
            ProbeSpec::library("vorbisenc", "vorbisenc", "vorbis_encode_ctl").depends_on("vorbis"),
            ProbeSpec::library("vorbisfile", "vorbisfile", "ov_open_callbacks")
                .depends_on("vorbis"),
            ProbeSpec::library("sqlite", "sqlite", "sqlite_open"),
            ProbeSpec::library("math", "m", "cos"),
        ];

        let platform_groups = vec![PlatformGroup {
            name: "CoreAudio".to_string(),
            os: OsFamily::Macos,
            flags: vec!["-framework".to_string(), "CoreAudio".to_string()],
        }];

        Self {
            probes,
            platform_groups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_shape() {
        let m = Manifest::builtin();
        assert_eq!(m.probes.len(), 14);
        assert_eq!(m.platform_groups.len(), 1);
    }

    #[test]
    fn test_required_set() {
        let m = Manifest::builtin();
        let required: Vec<&str> = m
            .probes
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(required, vec!["mad", "glib", "dbus", "dbusglib"]);
    }

    #[test]
    fn test_dependency_declarations() {
        let m = Manifest::builtin();
        let dep_of = |name: &str| {
            m.probes
                .iter()
                .find(|p| p.name == name)
                .and_then(|p| p.depends.as_deref())
        };
        assert_eq!(dep_of("sdl-ttf"), Some("sdl"));
        assert_eq!(dep_of("vorbisenc"), Some("vorbis"));
        assert_eq!(dep_of("vorbisfile"), Some("vorbis"));
        assert_eq!(dep_of("sqlite"), None);
    }

    #[test]
    fn test_dependencies_declared_after_their_targets() {
        let m = Manifest::builtin();
        let index_of = |name: &str| m.probes.iter().position(|p| p.name == name).unwrap();
        for probe in &m.probes {
            if let Some(dep) = &probe.depends {
                assert!(
                    index_of(dep) < index_of(&probe.name),
                    "{} declared before its dependency {}",
                    probe.name,
                    dep
                );
            }
        }
    }

    #[test]
    fn test_coreaudio_is_macos_only() {
        let m = Manifest::builtin();
        let core_audio = &m.platform_groups[0];
        assert_eq!(core_audio.name, "CoreAudio");
        assert_eq!(core_audio.os, OsFamily::Macos);
        assert_eq!(core_audio.flags, vec!["-framework", "CoreAudio"]);
    }
}
