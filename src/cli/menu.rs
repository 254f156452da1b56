//! Interactive advising menu
//!
//! Reads choices line by line from any `BufRead` and writes plain text to any
//! `Write`, so the loop can be driven by stdin/stdout or by tests.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::Path;

use tracing::{debug, instrument};

use crate::application::services::CatalogService;
use crate::application::ApplicationResult;
use crate::cli::output;
use crate::domain::LoadReport;
use crate::infrastructure::{InfraError, InfraResult};

const EXIT_CHOICE: i32 = 9;

const BANNER: &str = r#"

   ###    ####    ####   ##  ##
  ## ##   ##  ##  ##     ##  ##
 ##   ##  ####    ##     ##  ##
 #######  ##  ##  ##     ##  ##
 ##   ##  ####    ####   ######

     ADVISING PROGRAM
     ================
"#;

pub struct Menu<'a, R, W> {
    service: &'a mut CatalogService,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(service: &'a mut CatalogService, input: R, out: W) -> Self {
        Self {
            service,
            input,
            out,
        }
    }

    fn say(&mut self, msg: impl Display) -> InfraResult<()> {
        writeln!(self.out, "{}", msg).map_err(|e| InfraError::io("write menu output", e))
    }

    fn prompt(&mut self, msg: &str) -> InfraResult<()> {
        write!(self.out, "{} ", msg)
            .and_then(|_| self.out.flush())
            .map_err(|e| InfraError::io("write menu output", e))
    }

    /// Next input line without its terminator, `None` at end of input.
    fn read_line(&mut self) -> InfraResult<Option<String>> {
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .map_err(|e| InfraError::io("read menu input", e))?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Print the title screen, then load `file` or the configured default course file.
    pub fn preload(&mut self, file: Option<&Path>) -> InfraResult<()> {
        self.say(BANNER)?;
        self.say("Loading course data...")?;
        let result = match file {
            Some(path) => self.service.reload(path),
            None => self.service.reload_default(),
        };
        self.report_load(result)
    }

    /// Run until the user exits or input ends.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&mut self) -> InfraResult<()> {
        loop {
            self.show_menu()?;
            let Some(line) = self.read_line()? else {
                debug!("menu input closed");
                return Ok(());
            };

            let choice = match line.parse::<i32>() {
                Ok(choice) => choice,
                Err(_) => {
                    self.say("\nInvalid input. Please enter a number.")?;
                    continue;
                }
            };
            debug!(choice, "menu choice");

            match choice {
                1 => self.load()?,
                2 => self.print_course_list()?,
                3 => self.print_course()?,
                EXIT_CHOICE => {
                    self.say("\nThank you for using the course planner!")?;
                    return Ok(());
                }
                other => self.say(format!("\n{} is not a valid option.", other))?,
            }
        }
    }

    fn show_menu(&mut self) -> InfraResult<()> {
        self.say("\n====================================")?;
        self.say("Welcome to the course planner.")?;
        self.say("====================================")?;
        self.say("  1. Load Data Structure.")?;
        self.say("  2. Print Course List.")?;
        self.say("  3. Print Course.")?;
        self.say("  9. Exit")?;
        self.say("====================================")?;
        self.prompt("What would you like to do?")
    }

    fn load(&mut self) -> InfraResult<()> {
        let default = self.service_default_path();
        self.say("\n--- Load Data Options ---")?;
        self.say(format!("1. Use default file ({})", default))?;
        self.say("2. Enter custom file path")?;
        self.prompt("Enter your choice:")?;

        let result = match self.read_line()?.as_deref() {
            Some("1") => {
                self.say(format!("\nUsing default file: {}", default))?;
                self.service.reload_default()
            }
            Some("2") => {
                self.prompt("\nEnter the file name or path:")?;
                match self.read_line()? {
                    Some(path) if !path.is_empty() => self.service.reload(Path::new(&path)),
                    _ => return self.say("No file name entered."),
                }
            }
            _ => return self.say("Invalid option."),
        };
        self.report_load(result)
    }

    fn service_default_path(&self) -> String {
        self.service.settings().catalog_path.display().to_string()
    }

    /// Print the outcome of a load. Load failures are shown, not propagated:
    /// the previously published catalog stays usable.
    fn report_load(&mut self, result: ApplicationResult<LoadReport>) -> InfraResult<()> {
        match result {
            Ok(report) => {
                for dangling in &report.dangling {
                    self.say(format!("Warning: {}", output::dangling_message(dangling)))?;
                }
                if report.has_warnings() {
                    self.say("Warning: Some prerequisite validation issues were found, but continuing to load data.")?;
                }
                self.say(format!(
                    "Successfully loaded {} courses.",
                    report.summary.total_courses
                ))?;
                self.say("\nData Summary:")?;
                for line in output::summary_lines(&report.summary) {
                    self.say(format!("  {}", line))?;
                }
                Ok(())
            }
            Err(e) if e.is_load_failure() => {
                self.say(format!("Error: {}", e))?;
                if self.service.is_loaded() {
                    self.say("Keeping previously loaded course data.")?;
                }
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn print_course_list(&mut self) -> InfraResult<()> {
        if !self.service.is_loaded() {
            return self.no_data();
        }
        let lines: Vec<String> = self.service.list()?.iter().map(|c| c.to_string()).collect();

        self.say("\nHere is a sample schedule:\n")?;
        self.say(format!("Displaying {} course(s):\n", lines.len()))?;
        for line in &lines {
            self.say(line)?;
        }
        self.say(format!("\nTotal: {} courses listed.", lines.len()))
    }

    fn print_course(&mut self) -> InfraResult<()> {
        if !self.service.is_loaded() {
            return self.no_data();
        }

        self.prompt("\nWhat course do you want to know about?")?;
        let input = self.read_line()?.unwrap_or_default();
        if input.is_empty() {
            return self.say("No course number entered.");
        }

        match self.service.describe(&input)? {
            Some(detail) => {
                self.say("\n--- Course Information ---")?;
                for line in output::course_detail_lines(&detail) {
                    self.say(line)?;
                }
                self.say("--------------------------")
            }
            None => {
                let key = self.service.normalize_key(&input);
                self.say(format!("\nCourse '{}' not found.", key))?;
                self.say("Tip: Make sure to enter the complete course number (e.g., CSCI101, MATH201)")
            }
        }
    }

    fn no_data(&mut self) -> InfraResult<()> {
        self.say("\nError: No data loaded. Please load data first (Option 1).")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    use crate::config::Settings;
    use crate::infrastructure::traits::RealFileSystem;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(RealFileSystem), Arc::new(Settings::default()))
    }

    fn run_menu(service: &mut CatalogService, input: &str) -> String {
        let mut out = Vec::new();
        Menu::new(service, Cursor::new(input.as_bytes()), &mut out)
            .run()
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn given_no_data_when_listing_then_asks_to_load_first() {
        let mut svc = service();
        let out = run_menu(&mut svc, "2\n9\n");
        assert!(out.contains("No data loaded"));
        assert!(out.contains("Thank you for using the course planner!"));
    }

    #[test]
    fn given_loaded_catalog_when_listing_then_prints_in_order() {
        let mut svc = service();
        svc.load_records(["CSCI200,Data Structures,CSCI100", "CSCI100,Intro"])
            .unwrap();

        let out = run_menu(&mut svc, "2\n9\n");

        let first = out.find("CSCI100, Intro").unwrap();
        let second = out.find("CSCI200, Data Structures").unwrap();
        assert!(first < second);
        assert!(out.contains("Total: 2 courses listed."));
    }

    #[test]
    fn given_lowercase_lookup_when_printing_course_then_shows_prerequisites() {
        let mut svc = service();
        svc.load_records(["CSCI200,Data Structures,CSCI100", "CSCI100,Intro"])
            .unwrap();

        let out = run_menu(&mut svc, "3\ncsci200\n9\n");

        assert!(out.contains("CSCI200, Data Structures"));
        assert!(out.contains("  - CSCI100: Intro"));
    }

    #[test]
    fn given_unknown_course_when_printing_course_then_not_found() {
        let mut svc = service();
        svc.load_records(["CSCI100,Intro"]).unwrap();

        let out = run_menu(&mut svc, "3\nmath999\n9\n");

        assert!(out.contains("Course 'MATH999' not found."));
    }

    #[test]
    fn given_garbage_and_unknown_choice_when_running_then_reprompts() {
        let mut svc = service();
        let out = run_menu(&mut svc, "abc\n7\n9\n");
        assert!(out.contains("Invalid input. Please enter a number."));
        assert!(out.contains("7 is not a valid option."));
    }

    #[test]
    fn given_missing_custom_file_when_loading_then_keeps_previous_catalog() {
        let mut svc = service();
        svc.load_records(["CSCI100,Intro"]).unwrap();

        let out = run_menu(&mut svc, "1\n2\n/nonexistent/courses.csv\n2\n9\n");

        assert!(out.contains("Error: could not open course source"));
        assert!(out.contains("Keeping previously loaded course data."));
        assert!(out.contains("CSCI100, Intro"));
    }

    #[test]
    fn given_malformed_file_when_preloading_then_reports_line_and_stays_unloaded() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("courses.csv");
        std::fs::write(&path, "CSCI100,Intro\nONLYONEFIELD\n").unwrap();
        let mut svc = service();
        let mut out = Vec::new();

        Menu::new(&mut svc, Cursor::new(&b""[..]), &mut out)
            .preload(Some(&path))
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("ADVISING PROGRAM"));
        assert!(out.contains("malformed record on line 2"));
        assert!(!svc.is_loaded());
    }

    #[test]
    fn given_input_ends_when_running_then_returns_cleanly() {
        let mut svc = service();
        let out = run_menu(&mut svc, "");
        assert!(out.contains("What would you like to do?"));
    }
}
