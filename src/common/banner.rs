use crate::log_println;

const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";

macro_rules! env_or {
    ($key:literal, $default:literal) => {
        option_env!($key).unwrap_or($default)
    };
}

/// Build metadata captured by `build.rs`.
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_time: u64,
    pub branch: &'static str,
    pub commit: &'static str,
    pub commit_time: u64,
    pub profile: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            build_time: env_or!("BUILD_TIME", "0").parse().unwrap_or(0),
            branch: env_or!("GIT_BRANCH", "unknown"),
            commit: env_or!("GIT_COMMIT", "unknown"),
            commit_time: env_or!("GIT_COMMIT_TIME", "0").parse().unwrap_or(0),
            profile: if cfg!(debug_assertions) {
                "debug"
            } else {
                "release"
            },
        }
    }
}

impl BuildInfo {
    pub fn commit_short(&self) -> &str {
        self.commit.get(..7).unwrap_or(self.commit)
    }
}

pub fn print_banner(info: &BuildInfo) {
    log_println!();
    log_println!("{GREEN}    ____             __                               {RESET}");
    log_println!("{GREEN}   / __ \\____ ______/ /___  ________  ______  _____  {RESET}");
    log_println!("{GREEN}  / /_/ / __ `/ ___/ __/ / / / ___/ / / / __ \\/ ___/  {RESET}");
    log_println!("{GREEN} / ____/ /_/ / /  / /_/ /_/ (__  ) /_/ / / / / /__    {RESET}");
    log_println!("{GREEN}/_/    \\__,_/_/   \\__/\\__, /____/\\__, /_/ /_/\\___/    {RESET}");
    log_println!("{GREEN}                     /____/     /____/                {RESET}");
    log_println!("{DIM}========================================{RESET}");
    log_println!();

    print_row("Version", info.version, CYAN);
    print_row("Branch", info.branch, RESET);
    print_row("Commit", info.commit_short(), RESET);
    print_row("Profile", info.profile, YELLOW);
    log_println!();
}

fn print_row(label: &str, value: &str, color: &str) {
    log_println!("  {BOLD}{label:<14}{RESET}{color}{value}{RESET}");
}
