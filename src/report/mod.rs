use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::debug;

use crate::{Error, Result};

mod arch;
mod distro;
mod kernel;
mod util;

pub use self::arch::{ArchSource, Lscpu};
pub use self::kernel::KernelInfo;

/// The report is always written here, relative to the working directory.
pub const REPORT_FILE_NAME: &str = "sys_info.txt";

#[non_exhaustive]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SystemReport {
    pub kernel: KernelInfo,
    pub distro: String,
    pub arch: Vec<String>,
}

impl SystemReport {
    /// Gather all report fields from the live system.
    pub fn collect() -> Result<Self> {
        Ok(Self {
            kernel: KernelInfo::new()?,
            distro: distro::description()?,
            arch: Lscpu.summary()?,
        })
    }

    /// Render the report text. Field order is fixed: OS type, distro,
    /// version, compiler, build time, architecture summary.
    pub fn render(&self) -> String {
        let mut text = os_type_line(&self.kernel);
        text.push('\n');
        text.push_str(&distro_line(&self.distro));
        text.push('\n');
        text.push_str(&kernel_detail(&self.kernel));
        text.push('\n');
        text.push_str(&arch_block(&self.arch));
        text
    }
}

/// Collect the live system information and write the report to `path`,
/// replacing any existing file.
///
/// Each source is read at the point its section is due, and sections are
/// written as they become available. A failed read aborts the run and leaves
/// the sections written so far on disk.
pub fn write_report(path: impl AsRef<Path>) -> Result<()> {
    write_report_with(
        path.as_ref(),
        kernel::KERNEL_VERSION_PATH.as_ref(),
        distro::LSB_RELEASE_PATH.as_ref(),
        &Lscpu,
    )
}

pub(crate) fn write_report_with(
    path: &Path,
    version_path: &Path,
    lsb_path: &Path,
    arch: &dyn ArchSource,
) -> Result<()> {
    debug!("writing report to {}", path.display());

    let mut out = File::create(path).map_err(|e| Error::unwritable(e, path))?;

    let kernel = KernelInfo::from_file(version_path)?;
    append(&mut out, &os_type_line(&kernel), path)?;

    let distro = distro::description_from(lsb_path)?;
    append(&mut out, &format!("\n{}", distro_line(&distro)), path)?;
    append(&mut out, &format!("\n{}", kernel_detail(&kernel)), path)?;

    let summary = arch.summary()?;
    append(&mut out, &format!("\n{}", arch_block(&summary)), path)?;

    debug!("report complete");

    Ok(())
}

fn append(out: &mut File, text: &str, path: &Path) -> Result<()> {
    out.write_all(text.as_bytes())
        .map_err(|e| Error::unwritable(e, path))
}

fn os_type_line(kernel: &KernelInfo) -> String {
    format!("OS Type: {}", kernel.os_type)
}

fn distro_line(distro: &str) -> String {
    format!("OS Distro: {distro}")
}

fn kernel_detail(kernel: &KernelInfo) -> String {
    let mut text = format!(
        "{}: {}\nKernel GCC build version info: {}\nKernel build time: ",
        kernel.version_label, kernel.version, kernel.gcc_version
    );

    // each build time field carries a trailing space, the last one included
    for field in &kernel.build_time {
        text.push_str(field);
        text.push(' ');
    }

    text
}

fn arch_block(lines: &[String]) -> String {
    let mut text = String::from("System Architecture info:\n");

    for line in lines {
        text.push_str(line);
        text.push('\n');
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERSION_LINE: &str = "Linux version 5.4.0-42-generic (buildd@lgw01-amd64-038) \
        (gcc version 9.3.0 20200808 (Ubuntu 9.3.0-10ubuntu2)) #46-Ubuntu SMP PREEMPT \
        Mon Jan 1 00:00:00 UTC 2024";

    const LSB_RELEASE: &str = "DISTRIB_ID=Ubuntu\n\
        DISTRIB_RELEASE=20.04\n\
        DISTRIB_CODENAME=focal\n\
        DISTRIB_DESCRIPTION=\"Ubuntu 20.04.6 LTS\"\n";

    const EXPECTED_REPORT: &str = "OS Type: Linux\n\
        OS Distro: \"Ubuntu 20.04.6 LTS\"\n\
        version: 5.4.0-42-generic\n\
        Kernel GCC build version info: 9.3.0 20200808\n\
        Kernel build time: Mon Jan 1 00:00:00 UTC 2024 \n\
        System Architecture info:\n\
        Architecture:            x86_64\n\
        CPU op-mode(s):          32-bit, 64-bit\n\
        Byte Order:              Little Endian\n\
        Address sizes:           39 bits physical, 48 bits virtual\n";

    struct FixedArch(Vec<String>);

    impl ArchSource for FixedArch {
        fn summary(&self) -> Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    fn arch_lines() -> Vec<String> {
        vec![
            "Architecture:            x86_64".to_string(),
            "CPU op-mode(s):          32-bit, 64-bit".to_string(),
            "Byte Order:              Little Endian".to_string(),
            "Address sizes:           39 bits physical, 48 bits virtual".to_string(),
        ]
    }

    fn sample_report() -> SystemReport {
        SystemReport {
            kernel: KernelInfo::parse(VERSION_LINE, "/test/version".as_ref()).unwrap(),
            distro: "\"Ubuntu 20.04.6 LTS\"".to_string(),
            arch: arch_lines(),
        }
    }

    fn write_fixtures(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
        let version_path = dir.join("version");
        let lsb_path = dir.join("lsb-release");

        std::fs::write(&version_path, format!("{VERSION_LINE}\n")).unwrap();
        std::fs::write(&lsb_path, LSB_RELEASE).unwrap();

        (version_path, lsb_path)
    }

    #[test]
    fn render_matches_expected_layout() {
        assert_eq!(sample_report().render(), EXPECTED_REPORT);
    }

    #[test]
    fn render_is_deterministic() {
        assert_eq!(sample_report().render(), sample_report().render());
    }

    #[test]
    fn labeled_sections_appear_in_fixed_order() {
        let text = sample_report().render();

        let labels = [
            "OS Type: ",
            "OS Distro: ",
            "version: ",
            "Kernel GCC build version info: ",
            "Kernel build time: ",
            "System Architecture info:",
        ];

        let mut cursor = 0;
        for label in labels {
            let at = text[cursor..]
                .find(label)
                .unwrap_or_else(|| panic!("missing section: {label}"));
            cursor += at + label.len();
        }
    }

    #[test]
    fn report_is_written_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let (version_path, lsb_path) = write_fixtures(dir.path());
        let report_path = dir.path().join(REPORT_FILE_NAME);

        write_report_with(
            &report_path,
            &version_path,
            &lsb_path,
            &FixedArch(arch_lines()),
        )
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(&report_path).unwrap(),
            EXPECTED_REPORT
        );
    }

    #[test]
    fn existing_report_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let (version_path, lsb_path) = write_fixtures(dir.path());
        let report_path = dir.path().join(REPORT_FILE_NAME);

        std::fs::write(&report_path, "unrelated content that must not survive\n").unwrap();

        write_report_with(
            &report_path,
            &version_path,
            &lsb_path,
            &FixedArch(arch_lines()),
        )
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(&report_path).unwrap(),
            EXPECTED_REPORT
        );
    }

    #[test]
    fn failed_source_leaves_partial_report() {
        let dir = tempfile::tempdir().unwrap();
        let (version_path, lsb_path) = write_fixtures(dir.path());
        let report_path = dir.path().join(REPORT_FILE_NAME);

        std::fs::write(&lsb_path, "DISTRIB_ID=Ubuntu\n").unwrap();

        let error = write_report_with(
            &report_path,
            &version_path,
            &lsb_path,
            &FixedArch(arch_lines()),
        )
        .unwrap_err();

        assert_eq!(error.kind(), crate::ErrorKind::Malformed);

        // only the section completed before the failure is on disk
        let written = std::fs::read_to_string(&report_path).unwrap();
        assert_eq!(written, "OS Type: Linux");
        assert!(!written.contains("System Architecture info:"));
    }

    #[test]
    fn missing_source_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let (version_path, _) = write_fixtures(dir.path());
        let report_path = dir.path().join(REPORT_FILE_NAME);

        let error = write_report_with(
            &report_path,
            &version_path,
            &dir.path().join("no-such-file"),
            &FixedArch(arch_lines()),
        )
        .unwrap_err();

        assert_eq!(error.kind(), crate::ErrorKind::Unreadable);
    }

    #[test]
    fn report_serializes() {
        let json = serde_json::to_string(&sample_report()).unwrap();

        assert!(json.contains("\"os_type\":\"Linux\""));
        assert!(json.contains("\"distro\":\"\\\"Ubuntu 20.04.6 LTS\\\"\""));
    }
}
