// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;

use crate::cmd::check::check_course;
use crate::cmd::progress::ProgressFormat;
use crate::cmd::progress::print_progress;
use crate::cmd::reset::reset_progress;
use crate::error::Fallible;
use crate::shell::server::start_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Serve a course and open it in the browser.
    Serve {
        /// Path to the course directory. By default, the current working directory is used.
        directory: Option<String>,
        /// The port to use for the web server.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Do not open the browser.
        #[arg(long)]
        no_open: bool,
    },
    /// Check the course configuration, the sidebar, and the lesson catalogs.
    Check {
        /// Path to the course directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Print the stored progress.
    Progress {
        /// Path to the course directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Output format.
        #[arg(long, default_value_t = ProgressFormat::Text)]
        format: ProgressFormat,
    },
    /// Forget the course progress, as the restart button does.
    Reset {
        /// Path to the course directory. By default, the current working directory is used.
        directory: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve {
            directory,
            port,
            no_open,
        } => start_server(directory, port, !no_open).await,
        Command::Check { directory } => check_course(directory),
        Command::Progress { directory, format } => print_progress(directory, format),
        Command::Reset { directory } => reset_progress(directory),
    }
}
