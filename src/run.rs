use crate::args::{Invocation, Run};
use serde_yaml::from_reader;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub fn run(invocation: Invocation) -> Result<(), String> {
    match invocation {
        Invocation::Run(run) => run_yaml(run).map_err(|e| format!("{}", e)),
        Invocation::List(list) => crate::list::list(&list).map_err(|e| format!("{}", e)),
        Invocation::Send(send) => crate::send::send(&send).map_err(|e| format!("{}", e)),
        Invocation::Enable(enable) => {
            crate::activate::enable(&enable).map_err(|e| format!("{}", e))
        }
        Invocation::Clear(clear) => crate::activate::clear(&clear).map_err(|e| format!("{}", e))
    }
}

fn run_yaml(opts: Run) -> Result<(), RunError> {
    let path = opts.config;
    debug!("Reading invocation from {}", path.display());
    let file = File::open(&path).map_err(|e| RunError::io(e, &path))?;
    let invocation: Invocation =
        from_reader(file).map_err(|e| RunError::deserialize(e, &path))?;
    run(invocation).map_err(RunError::Cmd)
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Could not open YAML configuration file {}: {source}", .path.display())]
    IO {
        source: std::io::Error,
        path: PathBuf
    },
    #[error("Could not parse YAML configuration file {}: {source}", .path.display())]
    Deserialize {
        source: serde_yaml::Error,
        path: PathBuf
    },
    #[error("{0}")]
    Cmd(String)
}

impl RunError {
    fn io(source: std::io::Error, path: &Path) -> Self {
        Self::IO {
            source,
            path: path.into()
        }
    }

    fn deserialize(source: serde_yaml::Error, path: &Path) -> Self {
        Self::Deserialize {
            source,
            path: path.into()
        }
    }
}
