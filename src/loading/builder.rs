//! Builds the static network from an INI-like description document.
//!
//! Defective lines and routes are logged and skipped so one bad section does
//! not take the whole network down; structurally broken documents fail the
//! load. Nothing here runs after startup.

use std::path::Path;

use log::{info, warn};

use crate::error::Error;
use crate::model::{
    Day, DifTime, Lines, Route, Stop, StopDescriptions, Time, TimeLine,
};
use crate::routing::TransitNetwork;

use super::ini::IniDoc;

/// A reusable row of inter-stop travel durations, anchored at one stop of
/// the route. Expanded into concrete trips by the timetable sections.
#[derive(Clone, Debug)]
struct DurationProfile {
    from: Stop,
    durations: Vec<DifTime>,
}

impl DurationProfile {
    fn apply(&self, start: Time) -> TimeLine {
        let mut time = start;
        let mut line = vec![start];
        for &duration in &self.durations {
            time += duration;
            line.push(time);
        }
        line
    }
}

/// Loads a network description file and builds a query-ready network.
pub fn load_network(path: impl AsRef<Path>) -> Result<(TransitNetwork, StopDescriptions), Error> {
    let (lines, stops) = load_lines(path)?;
    Ok((TransitNetwork::new(lines), stops))
}

/// Loads a network description file into a [`Lines`] snapshot plus the
/// free-text stop descriptions.
pub fn load_lines(path: impl AsRef<Path>) -> Result<(Lines, StopDescriptions), Error> {
    let path = path.as_ref();
    info!("loading network description: {}", path.display());
    lines_from_str(&std::fs::read_to_string(path)?)
}

pub fn lines_from_str(text: &str) -> Result<(Lines, StopDescriptions), Error> {
    let doc = IniDoc::parse(text)?;

    let mut descriptions = StopDescriptions::new();
    if let Some(section) = doc.section("stops") {
        for (stop, property) in section {
            descriptions.insert(stop.clone(), property.items());
        }
    }

    let mut lines = Lines::default();
    match doc.property("", "lines") {
        Some(names) => {
            for name in names.items() {
                if let Err(err) = read_line(&doc, &name, &mut lines) {
                    warn!("skipping line {name}: {err}");
                    lines.remove_line(&name);
                }
            }
        }
        None => warn!("network description has no 'lines' property"),
    }

    read_walking(&doc, &mut lines)?;

    info!(
        "network loaded: {} lines, {} stops, {} walking segments",
        lines.line_names().len(),
        lines.stop_set().len(),
        lines.walking_times().len()
    );
    Ok((lines, descriptions))
}

fn read_line(doc: &IniDoc, name: &str, lines: &mut Lines) -> Result<(), Error> {
    let route_names = doc.require(name, "routes")?.items();
    let line = lines.add_line(name);
    for route_name in route_names {
        let section = format!("{name}.{route_name}");
        let route = line.add_route(route_name.clone());
        if let Err(err) = read_route(doc, &section, route) {
            warn!("skipping route {section}: {err}");
            line.remove_route(&route_name);
        }
    }
    if line.is_empty() {
        return Err(Error::Config(format!("line '{name}' has no usable route")));
    }
    Ok(())
}

fn read_route(doc: &IniDoc, section: &str, route: &mut Route) -> Result<(), Error> {
    route.set_description(doc.require(section, "description")?.string());

    for stop in doc.require(section, "stops")?.items() {
        route.add_stop(stop);
    }
    let stop_count = route.stops().len();
    for day in Day::WEEK {
        route.schedule_mut(day).set_stop_count(stop_count);
    }

    if let Some(platforms) = doc.section(&format!("{section}.platforms")) {
        for (stop, platform) in platforms {
            route.add_platform(stop, platform.string())?;
        }
    }

    let profiles = read_profiles(doc, section, route);

    let timetables = doc.require(section, "timetables")?.items();
    for day in Day::WEEK {
        let Some(table_name) = timetables.get(day.index()) else {
            warn!("{section}: no timetable entry for {day}");
            continue;
        };
        if table_name.is_empty() {
            continue;
        }
        read_timetable(
            doc,
            &format!("{section}.{table_name}"),
            &profiles,
            route,
            day,
        )?;
    }
    Ok(())
}

/// Reads `[<line>.<route>.durations]`: each property is a named profile. The
/// first item anchors the profile at a stop of the route when it names one;
/// otherwise the profile starts at the route's first stop.
fn read_profiles(
    doc: &IniDoc,
    section: &str,
    route: &Route,
) -> Vec<(String, DurationProfile)> {
    let mut profiles = Vec::new();
    let Some(durations) = doc.section(&format!("{section}.durations")) else {
        return profiles;
    };
    for (name, property) in durations {
        let items = property.items();
        let mut items = items.as_slice();
        let from = match items.first() {
            Some(first) if route.stop_index(first).is_some() => {
                let from = first.clone();
                items = &items[1..];
                from
            }
            _ => match route.stops().first() {
                Some(first) => first.clone(),
                None => continue,
            },
        };
        let durations: Result<Vec<DifTime>, _> =
            items.iter().map(|item| item.parse::<DifTime>()).collect();
        match durations {
            Ok(durations) => profiles.push((name.clone(), DurationProfile { from, durations })),
            Err(err) => warn!("{section}: ignoring duration profile '{name}': {err}"),
        }
    }
    profiles
}

/// Reads one timetable section: `start-time = profile[, repetitions[, cadency]]`.
fn read_timetable(
    doc: &IniDoc,
    section: &str,
    profiles: &[(String, DurationProfile)],
    route: &mut Route,
    day: Day,
) -> Result<(), Error> {
    let Some(entries) = doc.section(section) else {
        return Ok(());
    };
    for (start, property) in entries {
        let mut start: Time = start.parse()?;
        let items = property.items();
        let profile_name = items
            .first()
            .ok_or_else(|| Error::Config(format!("[{section}]: empty timetable entry")))?;
        let profile = profiles
            .iter()
            .find(|(name, _)| name == profile_name)
            .map(|(_, profile)| profile)
            .ok_or_else(|| {
                Error::Config(format!("[{section}]: unknown duration profile '{profile_name}'"))
            })?;
        let repetitions: usize = match items.get(1) {
            Some(item) => item
                .parse()
                .map_err(|_| Error::Config(format!("[{section}]: bad repetition count '{item}'")))?,
            None => 1,
        };
        let cadency: DifTime = match items.get(2) {
            Some(item) => item.parse()?,
            None => DifTime::ZERO,
        };

        let from_index = route.stop_index(&profile.from).unwrap_or(0);
        for _ in 0..repetitions {
            route
                .schedule_mut(day)
                .add_time_line(from_index, profile.apply(start))?;
            start += cadency;
        }
    }
    Ok(())
}

/// Reads `[walking]`: each key is a stop pair, the value a fixed duration.
fn read_walking(doc: &IniDoc, lines: &mut Lines) -> Result<(), Error> {
    let Some(section) = doc.section("walking") else {
        return Ok(());
    };
    for (pair, duration) in section {
        let stops: Vec<&str> = pair.split(',').map(str::trim).collect();
        let [a, b] = stops.as_slice() else {
            return Err(Error::Config(format!(
                "[walking]: expected 'stop, stop', got '{pair}'"
            )));
        };
        let duration: DifTime = duration.string().parse()?;
        if a == b || duration < DifTime::ZERO {
            warn!("[walking]: ignoring degenerate segment '{pair} = {duration}'");
            continue;
        }
        lines.add_walking(*a, *b, duration);
    }
    Ok(())
}
