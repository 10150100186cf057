use anyhow::Context;
use arbor::ephemeris::{resolve_readings, EphemerisSettings, GeoLocation, PositionOracle, RawReading};
use arbor::returns::{approximate_return, ReturnError, SolarReturn, SolarReturnFinder};
use arbor::settings::EngineSettings;
use arbor::{detect_transits, Body, ChartEngine, ChartReport, SwissEphemerisAdapter};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "arbor", author, version, about = "Weighted symbolic chart engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute a chart report from a JSON snapshot of body readings
    Report {
        /// JSON array of readings (body, longitude or sign + degree, house, retrograde)
        #[arg(long)]
        input: PathBuf,
        /// Engine config (defaults to ARBOR_CONFIG or configs/arbor.toml)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Compute a chart report from the ephemeris for a birth date, time and place
    Chart {
        /// Birth date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Local birth time, HH:MM or HH:MM:SS
        #[arg(long)]
        time: String,
        /// UTC offset of the birth time, e.g. +02:00
        #[arg(long, default_value = "+00:00", allow_hyphen_values = true)]
        utc_offset: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Swiss Ephemeris data directory (defaults to SWISS_EPHEMERIS_PATH)
        #[arg(long)]
        ephe_path: Option<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
    /// Find the exact solar return for a target year, with natal and return charts
    SolarReturn {
        /// Birth date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Local birth time, HH:MM or HH:MM:SS
        #[arg(long)]
        time: String,
        /// UTC offset of the birth time, e.g. +02:00
        #[arg(long, default_value = "+00:00", allow_hyphen_values = true)]
        utc_offset: String,
        /// Year of the return
        #[arg(long)]
        year: i32,
        /// Latitude used for house placement
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude used for house placement
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        lon: f64,
        /// Swiss Ephemeris data directory (defaults to SWISS_EPHEMERIS_PATH)
        #[arg(long)]
        ephe_path: Option<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
    /// Aspects from a transit snapshot onto a natal snapshot
    Transits {
        #[arg(long)]
        natal: PathBuf,
        #[arg(long)]
        transit: PathBuf,
        /// Twelve comma-separated natal house cusps in degrees
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        cusps: Vec<f64>,
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Report { input, config, pretty } => run_report(&input, config.as_deref(), pretty),
        Commands::Chart {
            date,
            time,
            utc_offset,
            lat,
            lon,
            ephe_path,
            config,
            pretty,
        } => {
            let reference = parse_reference(&date, &time, &utc_offset)?;
            let engine = ChartEngine::new(load_settings(config.as_deref())?)?;
            let adapter = SwissEphemerisAdapter::new(ephe_path, &EphemerisSettings::default())
                .context("Swiss Ephemeris is required for chart")?;
            let report = chart_at(
                &engine,
                &adapter,
                reference.with_timezone(&Utc),
                &GeoLocation { lat, lon },
            );
            print_json(&report, pretty)
        }
        Commands::SolarReturn {
            date,
            time,
            utc_offset,
            year,
            lat,
            lon,
            ephe_path,
            config,
            pretty,
        } => {
            let reference = parse_reference(&date, &time, &utc_offset)?;
            let engine = ChartEngine::new(load_settings(config.as_deref())?)?;
            let output = run_solar_return(&engine, &reference, year, GeoLocation { lat, lon }, ephe_path)?;
            print_json(&output, pretty)
        }
        Commands::Transits {
            natal,
            transit,
            cusps,
            pretty,
        } => run_transits(&natal, &transit, &cusps, pretty),
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}

fn read_readings(path: &Path) -> anyhow::Result<Vec<RawReading>> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse snapshot {}", path.display()))
}

fn load_settings(config: Option<&Path>) -> anyhow::Result<EngineSettings> {
    match config {
        Some(path) => arbor_config::load_engine_settings_from(path),
        None => arbor_config::load_engine_settings(),
    }
}

fn run_report(input: &Path, config: Option<&Path>, pretty: bool) -> anyhow::Result<()> {
    let settings = load_settings(config)?;
    let readings = read_readings(input)?;
    let (positions, rejected) = resolve_readings(&readings);

    let mut report = ChartEngine::new(settings)?.compute(&positions);
    let mut excluded = rejected;
    excluded.append(&mut report.excluded);
    report.excluded = excluded;

    log::info!(
        "Report for {} bodies ({} excluded, {} critical paths)",
        report.bodies.len(),
        report.excluded.len(),
        report.critical_paths.len()
    );
    print_json(&report, pretty)
}

fn parse_reference(date: &str, time: &str, utc_offset: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").with_context(|| format!("Invalid --date {date}"))?;
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .with_context(|| format!("Invalid --time {time}"))?;
    let offset = parse_utc_offset(utc_offset)?;

    offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .ok_or_else(|| anyhow::anyhow!("Ambiguous local time {date} {time} at {utc_offset}"))
}

/// `+HH:MM`, `-HH:MM`, `+HH` or `Z`.
fn parse_utc_offset(text: &str) -> anyhow::Result<FixedOffset> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0).ok_or_else(|| anyhow::anyhow!("Invalid UTC offset"));
    }

    let (sign, rest) = match text.as_bytes().first() {
        Some(b'+') => (1, &text[1..]),
        Some(b'-') => (-1, &text[1..]),
        _ => anyhow::bail!("UTC offset must start with + or -: {text}"),
    };
    let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
    let hours: i32 = hours.parse().with_context(|| format!("Invalid UTC offset hours in {text}"))?;
    let minutes: i32 = minutes.parse().with_context(|| format!("Invalid UTC offset minutes in {text}"))?;

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| anyhow::anyhow!("UTC offset out of range: {text}"))
}

/// The return instant plus the charts at birth and at the return. Charts
/// are omitted when no ephemeris is available.
#[derive(Debug, Serialize)]
struct ReturnOutput {
    #[serde(flatten)]
    solar_return: SolarReturn,
    #[serde(skip_serializing_if = "Option::is_none")]
    natal: Option<ChartReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chart: Option<ChartReport>,
}

fn chart_at<O: PositionOracle>(
    engine: &ChartEngine,
    oracle: &O,
    instant: DateTime<Utc>,
    location: &GeoLocation,
) -> ChartReport {
    let bodies: Vec<Body> = EphemerisSettings::default().include_bodies;
    let report = engine.compute_from_oracle(oracle, instant, location, &bodies);
    log::info!(
        "Chart at {} for {} bodies ({} excluded)",
        instant,
        report.bodies.len(),
        report.excluded.len()
    );
    report
}

/// Exact return if the window brackets the crossing, otherwise the
/// approximate date, logged and labelled as such. Other failures propagate.
fn exact_or_approximate<O: PositionOracle>(
    oracle: &O,
    location: GeoLocation,
    reference: &DateTime<FixedOffset>,
    year: i32,
) -> anyhow::Result<SolarReturn> {
    match SolarReturnFinder::new(oracle, location).find(reference, year) {
        Ok(found) => Ok(found),
        Err(e @ ReturnError::NoBracket { .. }) => {
            log::warn!("{e}; returning approximate date");
            Ok(approximate_return(reference, year)?)
        }
        Err(e) => Err(e).context("Solar return search failed"),
    }
}

fn solar_return_with<O: PositionOracle>(
    engine: &ChartEngine,
    oracle: &O,
    reference: &DateTime<FixedOffset>,
    year: i32,
    location: GeoLocation,
) -> anyhow::Result<ReturnOutput> {
    let solar_return = exact_or_approximate(oracle, location, reference, year)?;
    let natal = chart_at(engine, oracle, reference.with_timezone(&Utc), &location);
    let chart = chart_at(engine, oracle, solar_return.instant, &location);

    Ok(ReturnOutput {
        solar_return,
        natal: Some(natal),
        chart: Some(chart),
    })
}

fn run_solar_return(
    engine: &ChartEngine,
    reference: &DateTime<FixedOffset>,
    year: i32,
    location: GeoLocation,
    ephe_path: Option<PathBuf>,
) -> anyhow::Result<ReturnOutput> {
    let adapter = match SwissEphemerisAdapter::new(ephe_path, &EphemerisSettings::default()) {
        Ok(adapter) => adapter,
        Err(e) => {
            log::warn!("Swiss Ephemeris unavailable ({e}); returning approximate date without charts");
            return Ok(ReturnOutput {
                solar_return: approximate_return(reference, year)?,
                natal: None,
                chart: None,
            });
        }
    };
    log::info!("Using ephemeris data at {}", adapter.ephemeris_path().display());

    solar_return_with(engine, &adapter, reference, year, location)
}

fn run_transits(natal: &Path, transit: &Path, cusps: &[f64], pretty: bool) -> anyhow::Result<()> {
    let cusps: Option<[f64; 12]> = match cusps.len() {
        0 => None,
        12 => {
            let mut array = [0.0; 12];
            array.copy_from_slice(cusps);
            Some(array)
        }
        n => anyhow::bail!("--cusps needs 12 values, got {n}"),
    };

    let (natal_positions, natal_rejected) = resolve_readings(&read_readings(natal)?);
    let (transit_positions, transit_rejected) = resolve_readings(&read_readings(transit)?);
    if !natal_rejected.is_empty() || !transit_rejected.is_empty() {
        log::warn!(
            "Skipped readings: natal {:?}, transit {:?}",
            natal_rejected,
            transit_rejected
        );
    }

    let transits = detect_transits(&natal_positions, &transit_positions, cusps.as_ref());
    log::info!("{} transits", transits.len());
    print_json(&transits, pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor::ephemeris::{BodyPosition, EphemerisError};
    use arbor::ReturnMode;
    use chrono::Timelike;
    use std::cell::Cell;

    fn origin() -> GeoLocation {
        GeoLocation { lat: 0.0, lon: 0.0 }
    }

    /// Sun at 0° before 2000 and 90° after, Moon fixed at 45°; counts calls.
    struct StepSun {
        calls: Cell<usize>,
    }

    impl PositionOracle for StepSun {
        fn position(
            &self,
            instant: DateTime<Utc>,
            _location: &GeoLocation,
            body: Body,
        ) -> Result<BodyPosition, EphemerisError> {
            self.calls.set(self.calls.get() + 1);
            let switch = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
            match body {
                Body::Sun if instant < switch => Ok(BodyPosition::from_longitude(body, 0.0, 1, false)),
                Body::Sun => Ok(BodyPosition::from_longitude(body, 90.0, 4, false)),
                Body::Moon => Ok(BodyPosition::from_longitude(body, 45.0, 2, false)),
                other => Err(EphemerisError::UnsupportedBody { body: other }),
            }
        }
    }

    /// One tropical year per cycle from the reference instant.
    struct LinearSun {
        epoch: DateTime<Utc>,
    }

    impl PositionOracle for LinearSun {
        fn position(
            &self,
            instant: DateTime<Utc>,
            _location: &GeoLocation,
            body: Body,
        ) -> Result<BodyPosition, EphemerisError> {
            if body != Body::Sun {
                return Err(EphemerisError::UnsupportedBody { body });
            }
            let days = (instant - self.epoch).num_seconds() as f64 / 86_400.0;
            Ok(BodyPosition::from_longitude(body, 100.0 + days * 360.0 / 365.2422, 5, false))
        }
    }

    struct Broken;

    impl PositionOracle for Broken {
        fn position(
            &self,
            instant: DateTime<Utc>,
            _location: &GeoLocation,
            body: Body,
        ) -> Result<BodyPosition, EphemerisError> {
            Err(EphemerisError::CalculationFailed {
                body,
                datetime: instant,
                message: "no data".to_string(),
            })
        }
    }

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(parse_utc_offset("+02:00").unwrap().local_minus_utc(), 7200);
        assert_eq!(parse_utc_offset("-03:30").unwrap().local_minus_utc(), -12600);
        assert_eq!(parse_utc_offset("+05").unwrap().local_minus_utc(), 18000);
        assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
        assert!(parse_utc_offset("0200").is_err());
    }

    #[test]
    fn test_parse_reference() {
        let reference = parse_reference("1990-06-15", "08:30", "-05:00").unwrap();
        let utc = reference.with_timezone(&Utc);
        assert_eq!(utc.hour(), 13);
        assert_eq!(utc.minute(), 30);
        assert!(parse_reference("1990-13-01", "08:30", "+00:00").is_err());
    }

    #[test]
    fn test_missing_ephemeris_falls_back() {
        let reference = parse_reference("1990-06-15", "08:30:00", "+00:00").unwrap();
        let output = run_solar_return(
            &ChartEngine::default(),
            &reference,
            2025,
            origin(),
            Some(PathBuf::from("/nonexistent/ephemeris")),
        )
        .unwrap();
        assert_eq!(output.solar_return.mode, ReturnMode::Approximate);
        assert!(output.natal.is_none());
        assert!(output.chart.is_none());
    }

    #[test]
    fn test_no_bracket_falls_back_to_approximate() {
        let oracle = StepSun { calls: Cell::new(0) };
        let reference = parse_reference("1999-06-01", "12:00", "+03:00").unwrap();

        let result = exact_or_approximate(&oracle, origin(), &reference, 2005).unwrap();

        assert_eq!(result.mode, ReturnMode::Approximate);
        assert_eq!(result.instant, Utc.with_ymd_and_hms(2005, 6, 1, 9, 0, 0).unwrap());
        // Target reading plus the full 41-sample scan
        assert_eq!(oracle.calls.get(), 42);
    }

    #[test]
    fn test_crossing_found_stays_exact() {
        let reference = parse_reference("1990-06-15", "08:30", "+00:00").unwrap();
        let oracle = LinearSun {
            epoch: reference.with_timezone(&Utc),
        };
        let result = exact_or_approximate(&oracle, origin(), &reference, 2000).unwrap();
        assert_eq!(result.mode, ReturnMode::Exact);
    }

    #[test]
    fn test_oracle_failure_is_not_masked() {
        let reference = parse_reference("1999-06-01", "12:00", "+00:00").unwrap();
        assert!(exact_or_approximate(&Broken, origin(), &reference, 2005).is_err());
    }

    #[test]
    fn test_solar_return_carries_both_charts() {
        let oracle = StepSun { calls: Cell::new(0) };
        let reference = parse_reference("1999-06-01", "12:00", "+00:00").unwrap();

        let output = solar_return_with(&ChartEngine::default(), &oracle, &reference, 2005, origin()).unwrap();

        assert_eq!(output.solar_return.mode, ReturnMode::Approximate);
        let natal = output.natal.unwrap();
        let chart = output.chart.unwrap();
        assert_eq!(natal.bodies.len(), 2);
        assert_eq!(natal.body(Body::Sun).map(|b| b.longitude), Some(0.0));
        assert_eq!(chart.body(Body::Sun).map(|b| b.longitude), Some(90.0));
        // Everything past the Moon is unsupported by this oracle
        assert_eq!(chart.excluded.len(), 8);
    }

    #[test]
    fn test_return_output_json_shape() {
        let oracle = StepSun { calls: Cell::new(0) };
        let reference = parse_reference("1999-06-01", "12:00", "+00:00").unwrap();
        let output = solar_return_with(&ChartEngine::default(), &oracle, &reference, 2005, origin()).unwrap();

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["mode"], "approximate");
        assert!(json["instant"].is_string());
        assert_eq!(json["chart"]["bodies"]["sun"]["sign"], "cancer");
        assert_eq!(json["natal"]["bodies"]["sun"]["sign"], "aries");
    }

    #[test]
    fn test_chart_uses_configured_bodies() {
        let oracle = StepSun { calls: Cell::new(0) };
        let instant = Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap();
        let report = chart_at(&ChartEngine::default(), &oracle, instant, &origin());

        assert_eq!(oracle.calls.get(), EphemerisSettings::default().include_bodies.len());
        assert_eq!(report.excluded.first().map(String::as_str), Some("mercury"));
    }
}
