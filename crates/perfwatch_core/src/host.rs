//! Host operating system vocabulary.
//!
//! The harness only distinguishes the three hosts the build tooling supports. The host decides which browsers exist,
//! which Dromaeo tags are runnable, where the build writes its output, and whether executables carry a suffix.
//!
//! ## Examples
//! ```rust
//! use perfwatch_core::HostOs;
//!
//! assert_eq!(HostOs::Linux.build_root("release", "ia32"), "out/ReleaseIA32");
//! assert_eq!(HostOs::MacOs.build_root("debug", "x64"), "xcodebuild/DebugX64");
//! assert_eq!(HostOs::Windows.exe_suffix(), ".exe");
//! ```

/// Operating system the harness is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostOs {
    Linux,
    MacOs,
    Windows,
}

impl HostOs {
    /// Detect the host this binary was compiled for.
    ///
    /// Anything that is neither macOS nor Windows is treated as Linux.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            HostOs::MacOs
        } else if cfg!(target_os = "windows") {
            HostOs::Windows
        } else {
            HostOs::Linux
        }
    }

    /// Short lowercase name, as used in directory layouts (`linux`, `macos`, `windows`).
    pub fn as_str(self) -> &'static str {
        match self {
            HostOs::Linux => "linux",
            HostOs::MacOs => "macos",
            HostOs::Windows => "windows",
        }
    }

    /// Suffix appended to native executables.
    pub fn exe_suffix(self) -> &'static str {
        match self {
            HostOs::Windows => ".exe",
            HostOs::Linux | HostOs::MacOs => "",
        }
    }

    /// Top-level directory the build tooling writes into on this host.
    pub fn build_dir(self) -> &'static str {
        match self {
            HostOs::Linux => "out",
            HostOs::MacOs => "xcodebuild",
            HostOs::Windows => "build",
        }
    }

    /// Relative build output root for a mode/architecture pair.
    ///
    /// ## Parameters
    /// - `mode`: build mode, e.g. `release`; the first letter is capitalized.
    /// - `arch`: target architecture, e.g. `ia32`; uppercased.
    ///
    /// ## Returns
    /// - (`String`): e.g. `out/ReleaseIA32`.
    pub fn build_root(self, mode: &str, arch: &str) -> String {
        let mut chars = mode.chars();
        let mode = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        format!("{}/{}{}", self.build_dir(), mode, arch.to_uppercase())
    }
}

impl std::fmt::Display for HostOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_root_capitalizes_mode_and_uppercases_arch() {
        assert_eq!(HostOs::Linux.build_root("release", "ia32"), "out/ReleaseIA32");
        assert_eq!(HostOs::Windows.build_root("debug", "x64"), "build/DebugX64");
    }

    #[test]
    fn test_build_root_empty_mode() {
        assert_eq!(HostOs::Linux.build_root("", "ia32"), "out/IA32");
    }

    #[test]
    fn test_exe_suffix_only_on_windows() {
        assert_eq!(HostOs::Linux.exe_suffix(), "");
        assert_eq!(HostOs::MacOs.exe_suffix(), "");
        assert_eq!(HostOs::Windows.exe_suffix(), ".exe");
    }
}
