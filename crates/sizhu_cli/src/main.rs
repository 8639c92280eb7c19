use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand, ValueEnum};
use sizhu_base::{Pillar, nayin};
use sizhu_chart::{Engine, RawBirthInput};
use sizhu_config::EngineConfig;
use sizhu_terms::SolarTerm;
use sizhu_time::{MAX_TZ_OFFSET_MINUTES, SolarTimeMode, correct, utc_to_local};

mod logger;
mod render;

#[derive(Parser, Debug)]
#[command(name = "sizhu", about = "Four-pillars (四柱) chart calculator")]
struct Cli {
    /// Engine configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SolarArg {
    None,
    Lmt,
    Tst,
}

impl SolarArg {
    fn code(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Lmt => "LMT",
            Self::Tst => "TST",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ZiArg {
    Early,
    Late,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum DayBoundaryArg {
    Solar,
    Civil,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate a full chart
    Chart {
        /// Local civil date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Local civil time (HH:MM or HH:MM:SS)
        #[arg(long)]
        time: String,
        /// UTC offset: minutes east (540) or +HH:MM
        #[arg(long, allow_hyphen_values = true, value_parser = parse_tz)]
        tz: i64,
        /// Longitude in degrees, east positive
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,
        /// Latitude in degrees, north positive
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Solar-time correction
        #[arg(long, value_enum, default_value = "none")]
        solar_time: SolarArg,
        /// Which day 23:00-23:59 belongs to
        #[arg(long, value_enum, default_value = "early")]
        zi_hour: ZiArg,
        /// Clock that decides the day pillar's date
        #[arg(long, value_enum, default_value = "solar")]
        day_boundary: DayBoundaryArg,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Attach the derivation trace
        #[arg(long)]
        trace: bool,
    },
    /// Resolve one solar term in one year
    Term {
        /// Term name: 立春, 惊蛰 or Lichun
        name: String,
        /// Gregorian year
        #[arg(allow_hyphen_values = true)]
        year: i32,
        /// Also show the instant at this UTC offset
        #[arg(long, allow_hyphen_values = true, value_parser = parse_tz)]
        tz: Option<i64>,
    },
    /// Show the solar-time correction for a civil time
    SolarTime {
        /// Local civil date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Local civil time (HH:MM or HH:MM:SS)
        #[arg(long)]
        time: String,
        /// UTC offset: minutes east (540) or +HH:MM
        #[arg(long, allow_hyphen_values = true, value_parser = parse_tz)]
        tz: i64,
        /// Longitude in degrees, east positive
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Correction mode
        #[arg(long, value_enum, default_value = "tst")]
        mode: SolarArg,
    },
    /// Na-yin (納音) of a pillar
    Nayin {
        /// Pillar name (甲子) or cycle index (0-59)
        pillar: String,
    },
}

/// Minutes east of UTC from `540`, `-300`, `+09:00` or `-03:30`.
fn parse_tz(s: &str) -> Result<i64, String> {
    let s = s.trim();
    let minutes = if let Some((h, m)) = s.split_once(':') {
        let negative = h.starts_with('-');
        let hours: i64 = h
            .trim_start_matches(['+', '-'])
            .parse()
            .map_err(|e| format!("invalid hours in {s:?}: {e}"))?;
        let mins: i64 = m
            .parse()
            .map_err(|e| format!("invalid minutes in {s:?}: {e}"))?;
        if mins >= 60 {
            return Err(format!("invalid minutes in {s:?}"));
        }
        let total = hours * 60 + mins;
        if negative { -total } else { total }
    } else {
        s.parse()
            .map_err(|e| format!("expected minutes or +HH:MM, got {s:?}: {e}"))?
    };
    let limit = i64::from(MAX_TZ_OFFSET_MINUTES);
    if minutes.abs() > limit {
        return Err(format!("offset {minutes} is outside -{limit}..={limit} minutes"));
    }
    Ok(minutes)
}

fn parse_local(date: &str, time: &str) -> Result<NaiveDateTime, String> {
    let d = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date {date:?} (YYYY-MM-DD): {e}"))?;
    let t = NaiveTime::parse_from_str(time.trim(), "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M"))
        .map_err(|e| format!("invalid time {time:?} (HH:MM[:SS]): {e}"))?;
    Ok(d.and_time(t))
}

fn load_engine(config: Option<&Path>) -> Result<Engine, Box<dyn Error>> {
    match config {
        Some(path) => {
            let cfg = EngineConfig::load(path)?;
            tracing::debug!(path = %path.display(), "configuration loaded");
            Ok(Engine::from_config(&cfg)?)
        }
        None => Ok(Engine::bundled()),
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Chart {
            date,
            time,
            tz,
            lon,
            lat,
            solar_time,
            zi_hour,
            day_boundary,
            json,
            trace,
        } => {
            let local = parse_local(&date, &time)?;
            let raw = raw_input(local, tz, lon, lat, solar_time, zi_hour, day_boundary);
            let mut engine = load_engine(cli.config.as_deref())?;
            if trace {
                engine = engine.with_trace(true);
            }
            let result = engine.calculate_raw(&raw)?;
            if result.used_fallback() {
                tracing::info!(
                    year = %result.boundaries.year_source,
                    month = %result.boundaries.month_source,
                    "boundary resolved from a fallback tier"
                );
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render::chart(&result));
            }
        }

        Commands::Term { name, year, tz } => {
            let term = SolarTerm::from_name(&name)
                .ok_or_else(|| format!("unknown solar term {name:?}"))?;
            let engine = load_engine(cli.config.as_deref())?;
            let record = engine
                .resolver()
                .resolve(term, year)
                .ok_or_else(|| format!("no data for {term} {year}"))?;
            println!(
                "{} ({}) {}: {} [{}]",
                record.term,
                record.term.pinyin(),
                record.year,
                record.instant.format("%Y-%m-%dT%H:%M:%SZ"),
                record.source
            );
            if let Some(tz) = tz {
                let local = utc_to_local(record.instant, tz as i32);
                println!("local {} at {tz:+} min", local.format("%Y-%m-%d %H:%M:%S"));
            }
        }

        Commands::SolarTime {
            date,
            time,
            tz,
            lon,
            mode,
        } => {
            if !lon.is_finite() || lon.abs() > 180.0 {
                return Err(format!("longitude {lon} is outside -180..=180").into());
            }
            let local = parse_local(&date, &time)?;
            let mode = match mode {
                SolarArg::None => SolarTimeMode::None,
                SolarArg::Lmt => SolarTimeMode::LocalMean { longitude_deg: lon },
                SolarArg::Tst => SolarTimeMode::TrueSolar { longitude_deg: lon },
            };
            let c = correct(local, tz as i32, mode);
            println!("{}", render::correction_line(&c));
            if c.day_delta != 0 {
                println!("day shift {:+}", c.day_delta);
            }
        }

        Commands::Nayin { pillar } => {
            let found = match pillar.trim().parse::<u8>() {
                Ok(i) if i < 60 => Some(Pillar::from_index(i)),
                Ok(_) => None,
                Err(_) => Pillar::from_name(pillar.trim()),
            };
            let p = found.ok_or_else(|| format!("not a sexagenary pillar: {pillar:?}"))?;
            let n = nayin(p);
            println!("{p} (#{}) {} [{}]", p.index(), n.name, n.element.name());
        }
    }
    Ok(())
}

fn raw_input(
    local: NaiveDateTime,
    tz: i64,
    lon: Option<f64>,
    lat: Option<f64>,
    solar_time: SolarArg,
    zi_hour: ZiArg,
    day_boundary: DayBoundaryArg,
) -> RawBirthInput {
    use chrono::{Datelike, Timelike};

    RawBirthInput {
        year: i64::from(local.year()),
        month: i64::from(local.month()),
        day: i64::from(local.day()),
        hour: i64::from(local.hour()),
        minute: i64::from(local.minute()),
        second: Some(i64::from(local.second())),
        tz_offset_minutes: tz,
        longitude: lon,
        latitude: lat,
        solar_time_mode: solar_time.code().to_string(),
        zi_hour_mode: match zi_hour {
            ZiArg::Early => "EARLY",
            ZiArg::Late => "LATE",
        }
        .to_string(),
        day_boundary_mode: Some(
            match day_boundary {
                DayBoundaryArg::Solar => "SOLAR_MIDNIGHT",
                DayBoundaryArg::Civil => "CIVIL_MIDNIGHT",
            }
            .to_string(),
        ),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tz_forms() {
        assert_eq!(parse_tz("540"), Ok(540));
        assert_eq!(parse_tz("-300"), Ok(-300));
        assert_eq!(parse_tz("+09:00"), Ok(540));
        assert_eq!(parse_tz("-03:30"), Ok(-210));
        assert!(parse_tz("+15:00").is_err());
        assert!(parse_tz("09:75").is_err());
        assert!(parse_tz("east").is_err());
    }

    #[test]
    fn local_forms() {
        let a = parse_local("1985-10-06", "19:30").unwrap();
        let b = parse_local("1985-10-06", "19:30:00").unwrap();
        assert_eq!(a, b);
        assert!(parse_local("1985-02-30", "12:00").is_err());
        assert!(parse_local("1985-10-06", "25:00").is_err());
    }

    #[test]
    fn chart_args() {
        let cli = Cli::try_parse_from([
            "sizhu",
            "chart",
            "--date",
            "1985-10-06",
            "--time",
            "19:30",
            "--tz",
            "+09:00",
            "--lon",
            "126.978",
            "--solar-time",
            "tst",
            "--zi-hour",
            "late",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Chart {
                tz,
                lon,
                solar_time,
                zi_hour,
                day_boundary,
                json,
                trace,
                ..
            } => {
                assert_eq!(tz, 540);
                assert_eq!(lon, Some(126.978));
                assert_eq!(solar_time, SolarArg::Tst);
                assert_eq!(zi_hour, ZiArg::Late);
                assert_eq!(day_boundary, DayBoundaryArg::Solar);
                assert!(json);
                assert!(!trace);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn raw_from_args_calculates() {
        let local = parse_local("1985-10-06", "19:30").unwrap();
        let raw = raw_input(
            local,
            540,
            None,
            None,
            SolarArg::None,
            ZiArg::Early,
            DayBoundaryArg::Solar,
        );
        let r = Engine::bundled().calculate_raw(&raw).unwrap();
        assert_eq!(r.pillars.to_string(), "乙丑 乙酉 戊寅 壬戌");
    }

    #[test]
    fn tst_without_longitude_is_rejected() {
        let local = parse_local("1985-10-06", "19:30").unwrap();
        let raw = raw_input(
            local,
            540,
            None,
            None,
            SolarArg::Tst,
            ZiArg::Early,
            DayBoundaryArg::Civil,
        );
        let errs = Engine::bundled().calculate_raw(&raw).unwrap_err();
        assert!(errs.has_field("longitude"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["sizhu", "nayin", "甲子", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.config.is_none());
    }
}
