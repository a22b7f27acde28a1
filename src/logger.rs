// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

/// Start of an export step. Prints "TASK: message" with a bold green prefix
#[macro_export]
macro_rules! task {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        println!("{} {}", "TASK:".green().bold(), format!($($arg)*));
    }};
}

/// Plain progress line, no prefix
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        println!("{}", format!($($arg)*));
    }};
}

/// Something the user should know about, e.g. a skipped step
#[macro_export]
macro_rules! note {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        println!("{} {}", "NOTE:".blue().bold(), format!($($arg)*));
    }};
}

/// Non fatal export problem, goes to stderr
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        eprintln!("{} {}", "WARN:".yellow().bold(), format!($($arg)*));
    }};
}

/// Prints "FATAL: message" to stderr and exits with status 1
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        eprintln!("{} {}", "FATAL:".red().bold().on_black(), format!($($arg)*));
        std::process::exit(1);
    }};
}
