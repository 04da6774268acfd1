use crate::client::output::outputs::Output;
use std::path::{Path, PathBuf};

pub struct GlobalSettings {
    log_dir: PathBuf,
    scheduler_program: String,
    dry_run: bool,
    printer: Box<dyn Output>,
}

impl GlobalSettings {
    pub fn new(
        log_dir: PathBuf,
        scheduler_program: String,
        dry_run: bool,
        printer: Box<dyn Output>,
    ) -> Self {
        GlobalSettings {
            log_dir,
            scheduler_program,
            dry_run,
            printer,
        }
    }

    /// Directory where the batch scripts write their logs.
    pub fn log_directory(&self) -> &Path {
        &self.log_dir
    }

    pub fn scheduler_program(&self) -> &str {
        &self.scheduler_program
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn printer(&self) -> &dyn Output {
        self.printer.as_ref()
    }
}
