//! Interactive session: prompts for filters, prints the summaries and pages
//! through raw rows until the user declines to restart.

use std::io::{BufRead, Write};
use std::time::Instant;
use tracing::{debug, info};

use crate::analyzers::{Report, duration_stats, station_stats, summarize, time_stats, user_stats};
use crate::config::{City, DatasetCapabilities};
use crate::error::Result;
use crate::filter::{ALL, FilterSelection, MONTH_NAMES, WEEKDAY_NAMES, filter_trips};
use crate::output::{
    RULE, write_duration_summary, write_rows, write_station_summary, write_time_summary,
    write_user_summary,
};
use crate::pager::Pager;
use crate::store::RecordStore;
use crate::trip::Trip;

const CITY_NAMES: [&str; 3] = ["chicago", "new york city", "washington"];

/// Validated answers for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub city: City,
    pub selection: FilterSelection,
}

/// Loads, filters and summarizes one city in a single pass.
#[tracing::instrument(skip(store))]
pub fn build_report<S: RecordStore>(store: &S, request: &Request) -> Result<Report> {
    let dataset = store.load(request.city)?;
    let filtered = filter_trips(&dataset.trips, &request.selection);
    Ok(summarize(&filtered, &request.selection, &dataset.capabilities))
}

/// Drives the prompt loop over any reader / writer pair.
pub struct Session<'a, S, R, W> {
    store: &'a S,
    input: R,
    output: W,
}

impl<'a, S, R, W> Session<'a, S, R, W>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    pub fn new(store: &'a S, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Runs analyses until the user stops restarting or input ends.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;

        let mut runs = 0usize;
        loop {
            let Some(request) = self.ask_request()? else {
                break;
            };
            runs += 1;
            info!(run = runs, city = %request.city, selection = %request.selection, "Starting analysis");

            if !self.analyze(&request)? {
                break;
            }
            if !self.confirm("\nWould you like to restart? Enter yes or no.\n")? {
                break;
            }
        }

        debug!(runs, "Session finished");
        Ok(())
    }

    /// Collects city, month and weekday. `None` when input ended.
    fn ask_request(&mut self) -> Result<Option<Request>> {
        let Some(city) = self.ask(
            "\nWhich city would you like explore? We have data from Chicago, New York City and Washington: ",
            "Please enter a valid city. Either Chicago, New York City, or Washington: ",
            &CITY_NAMES,
        )?
        else {
            return Ok(None);
        };

        let months: Vec<&str> = MONTH_NAMES.iter().copied().chain([ALL]).collect();
        let Some(month) = self.ask(
            "Which month would you like data from? Data is available from January through June. To explore all months choose 'All': ",
            "Please enter a valid month. Either January, February, March, April, May, June or All: ",
            &months,
        )?
        else {
            return Ok(None);
        };

        let days: Vec<&str> = WEEKDAY_NAMES.iter().copied().chain([ALL]).collect();
        let Some(day) = self.ask(
            "Which day of the week would you like data from? To explore all days choose 'All': ",
            "Please enter a valid day of the week. Either Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday or All: ",
            &days,
        )?
        else {
            return Ok(None);
        };

        writeln!(self.output, "{RULE}")?;
        Ok(Some(Request {
            city: city.parse()?,
            selection: FilterSelection::parse(&month, &day)?,
        }))
    }

    /// Prints the four summaries, then offers raw rows.
    /// Returns `false` if input ended while paging.
    fn analyze(&mut self, request: &Request) -> Result<bool> {
        let dataset = self.store.load(request.city)?;
        let selection = &request.selection;
        let filtered = filter_trips(&dataset.trips, selection);

        self.section("Calculating The Most Frequent Times of Travel...", |out| {
            write_time_summary(out, &time_stats(&filtered, selection))
        })?;
        self.section("Calculating The Most Popular Stations...", |out| {
            write_station_summary(out, &station_stats(&filtered))
        })?;
        self.section("Calculating Trip Duration...", |out| {
            write_duration_summary(out, &duration_stats(&filtered))
        })?;
        self.section("Calculating User Stats...", |out| {
            write_user_summary(out, &user_stats(&filtered, &dataset.capabilities))
        })?;

        self.page_rows(&filtered, &dataset.capabilities)
    }

    fn section<F>(&mut self, title: &str, body: F) -> Result<()>
    where
        F: FnOnce(&mut W) -> Result<()>,
    {
        writeln!(self.output, "\n{title}\n")?;
        let started = Instant::now();
        body(&mut self.output)?;
        writeln!(
            self.output,
            "\nThis took {} seconds.",
            started.elapsed().as_secs_f64()
        )?;
        writeln!(self.output, "{RULE}")?;
        Ok(())
    }

    fn page_rows(&mut self, rows: &[&Trip], capabilities: &DatasetCapabilities) -> Result<bool> {
        let mut pager = Pager::new(rows);
        let mut prompt = "\nWould you like to see 5 lines of raw data? ";

        loop {
            let Some(answer) = self.read_answer(prompt)? else {
                return Ok(false);
            };
            if answer != "yes" {
                return Ok(true);
            }
            match pager.next() {
                Some(page) => write_rows(&mut self.output, page, capabilities)?,
                None => {
                    writeln!(self.output, "No more raw data to display.")?;
                    return Ok(true);
                }
            }
            prompt = "\nWould you like to see 5 more lines of raw data? ";
        }
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(self.read_answer(prompt)?.is_some_and(|a| a == "yes"))
    }

    /// Re-prompts until the answer is one of `valid`.
    fn ask(&mut self, prompt: &str, retry: &str, valid: &[&str]) -> Result<Option<String>> {
        let mut prompt = prompt;
        loop {
            match self.read_answer(prompt)? {
                Some(answer) if valid.contains(&answer.as_str()) => return Ok(Some(answer)),
                Some(answer) => {
                    debug!(%answer, "Rejected input");
                    prompt = retry;
                }
                None => return Ok(None),
            }
        }
    }

    /// Lower-cased, trimmed line. `None` at end of input.
    fn read_answer(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Dataset, MemoryStore};
    use crate::trip::fixtures::{trip, with_gender};
    use std::io::Cursor;

    fn store() -> MemoryStore {
        let chicago = (0..7)
            .map(|i| {
                with_gender(
                    trip(
                        &format!("2017-01-0{} 08:15:00", i + 1),
                        &format!("2017-01-0{} 08:30:00", i + 1),
                        "Clark St",
                        "State St",
                        "Subscriber",
                    ),
                    "Female",
                )
            })
            .collect();
        let washington = vec![trip(
            "2017-02-01 17:00:00",
            "2017-02-01 17:20:00",
            "15th & K St NW",
            "Union Station",
            "Customer",
        )];

        MemoryStore::new()
            .with_dataset(Dataset {
                city: City::Chicago,
                capabilities: DatasetCapabilities::FULL,
                trips: chicago,
            })
            .with_dataset(Dataset {
                city: City::Washington,
                capabilities: DatasetCapabilities::BASIC,
                trips: washington,
            })
    }

    fn run(input: &str) -> String {
        let store = store();
        let mut output = Vec::new();
        Session::new(&store, Cursor::new(input.as_bytes()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_full_run() {
        let out = run("Chicago\nall\nall\nno\nno\n");
        assert!(out.contains("The most popular month to travel is January with a total of 7 trips."));
        assert!(out.contains("The most common station to start a trip is Clark St with a total of 7 trips."));
        assert!(out.contains("Here is the trip breakdown by gender:"));
        assert!(out.contains("This took"));
    }

    #[test]
    fn test_reprompts_invalid_answers() {
        let out = run("boston\nchicago\njuly\nMarch\nfunday\nall\nno\nno\n");
        assert!(out.contains("Please enter a valid city."));
        assert!(out.contains("Please enter a valid month."));
        assert!(out.contains("Please enter a valid day of the week."));
        // no March trips in the fixture
        assert!(out.contains("No trips match the selected filters."));
    }

    #[test]
    fn test_washington_has_no_gender_section() {
        let out = run("washington\nall\nall\nno\nno\n");
        assert!(out.contains("Here are the counts of user type:"));
        assert!(!out.contains("gender"));
    }

    #[test]
    fn test_washington_rows_omit_demographics() {
        let out = run("washington\nall\nall\nyes\nno\nno\n");
        assert_eq!(out.matches("\"start_station\"").count(), 1);
        assert!(!out.contains("gender"));
        assert!(!out.contains("birth_year"));
    }

    #[test]
    fn test_pages_raw_rows() {
        let out = run("chicago\nall\nall\nyes\nyes\nyes\nno\n");
        assert_eq!(out.matches("\"start_station\"").count(), 7);
        assert_eq!(out.matches("\"gender\": \"Female\"").count(), 7);
        assert_eq!(out.matches("\"birth_year\"").count(), 7);
        assert!(out.contains("Would you like to see 5 more lines of raw data?"));
        assert!(out.contains("No more raw data to display."));
    }

    #[test]
    fn test_restart_runs_again() {
        let out = run("chicago\nall\nall\nno\nyes\nwashington\nall\nall\nno\nno\n");
        assert_eq!(out.matches("Calculating User Stats...").count(), 2);
    }

    #[test]
    fn test_end_of_input_stops_cleanly() {
        let out = run("chicago\n");
        assert!(!out.contains("Calculating"));
    }

    #[test]
    fn test_build_report() {
        let store = store();
        let request = Request {
            city: City::Washington,
            selection: FilterSelection::parse("february", "all").unwrap(),
        };
        let report = build_report(&store, &request).unwrap();
        assert_eq!(report.time.trips, 1);
        assert!(report.users.genders.is_none());
    }
}
