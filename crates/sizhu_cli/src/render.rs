//! Plain-text rendering of command output.

use std::fmt::Write;

use sizhu_chart::{CalculationResult, SolarTermRecord, SolarTimeCorrection};
use sizhu_time::SolarTimeMode;

fn signed_offset(minutes: i32) -> String {
    let sign = if minutes < 0 { '-' } else { '+' };
    let m = minutes.unsigned_abs();
    format!("UTC{sign}{:02}:{:02}", m / 60, m % 60)
}

fn boundary(record: Option<SolarTermRecord>) -> String {
    match record {
        Some(r) => format!(
            "{} {} at {} ({})",
            r.term,
            r.year,
            r.instant.format("%Y-%m-%dT%H:%M:%SZ"),
            r.source
        ),
        None => "none".to_string(),
    }
}

/// One line describing a solar-time correction.
pub fn correction_line(c: &SolarTimeCorrection) -> String {
    if matches!(c.mode, SolarTimeMode::None) {
        return format!("{} (no correction)", c.civil.format("%Y-%m-%d %H:%M:%S"));
    }
    format!(
        "{} -> {} ({} {:+}s: meridian {:.1}, lmt {:+}s, eot {:+}s)",
        c.civil.format("%Y-%m-%d %H:%M:%S"),
        c.adjusted.format("%Y-%m-%d %H:%M:%S"),
        c.mode.code(),
        c.offsets.total_seconds,
        c.offsets.standard_meridian_deg,
        c.offsets.lmt_seconds,
        c.offsets.eot_seconds
    )
}

/// Multi-line chart summary.
pub fn chart(r: &CalculationResult) -> String {
    let mut out = String::new();
    let input = &r.input;
    // Writes into a String cannot fail.
    let _ = writeln!(
        out,
        "Input        {} {} ({}, {}, {})",
        input.local.format("%Y-%m-%d %H:%M:%S"),
        signed_offset(input.tz_offset_minutes),
        input.solar_time.code(),
        input.zi_hour.code(),
        input.day_boundary.code()
    );
    let _ = writeln!(out, "Solar time   {}", correction_line(&r.solar_time));
    let _ = writeln!(out);

    let row = |label: &str, cells: [String; 4]| {
        let mut line = format!("{label:<13}");
        for c in cells {
            let _ = write!(line, "{c:<6}");
        }
        line.trim_end().to_string()
    };
    let _ = writeln!(out, "{}", row("", ["年", "月", "日", "時"].map(String::from)));
    let _ = writeln!(out, "{}", row("Pillars", r.pillars.names()));
    let _ = writeln!(
        out,
        "{}",
        row(
            "Na-yin",
            [r.nayin.year, r.nayin.month, r.nayin.day, r.nayin.hour].map(|n| n.name.to_string())
        )
    );
    let hidden = [
        &r.hidden_stems.year,
        &r.hidden_stems.month,
        &r.hidden_stems.day,
        &r.hidden_stems.hour,
    ]
    .map(|hs| hs.iter().map(|h| h.stem.name()).collect::<String>());
    let _ = writeln!(out, "{}", row("Hidden", hidden));
    let _ = writeln!(out);

    let scores: Vec<String> = r
        .wuxing
        .totals
        .iter()
        .map(|(e, v)| format!("{} {v:.2}", e.name()))
        .collect();
    let _ = writeln!(
        out,
        "Wuxing       {}  (dominant {})",
        scores.join("  "),
        r.wuxing.totals.dominant().name()
    );
    let _ = writeln!(
        out,
        "Yin/yang     {} yang / {} yin ({:.1}% yang)",
        r.yin_yang.yang_count, r.yin_yang.yin_count, r.yin_yang.yang_percent
    );
    let _ = writeln!(out, "Day master   {}", r.pillars.day_master().name());
    let _ = writeln!(out);

    let b = &r.boundaries;
    let _ = writeln!(out, "Year         {} [{}]", boundary(b.lichun), b.year_source);
    let _ = writeln!(out, "Month        {} [{}]", boundary(b.month_term), b.month_source);
    let zi = if b.zi_advanced { ", early 子 hour" } else { "" };
    let _ = writeln!(out, "Day          {}{zi}", b.day_date);

    if !r.interactions.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Interactions");
        for i in &r.interactions {
            let _ = writeln!(out, "  {i}");
        }
    }
    if let Some(trace) = &r.trace {
        let _ = writeln!(out);
        let _ = writeln!(out, "Trace");
        for e in trace {
            let _ = writeln!(out, "  {e}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sizhu_chart::{BirthInput, Engine};

    #[test]
    fn offsets() {
        assert_eq!(signed_offset(540), "UTC+09:00");
        assert_eq!(signed_offset(-210), "UTC-03:30");
        assert_eq!(signed_offset(0), "UTC+00:00");
    }

    #[test]
    fn chart_text() {
        let input = BirthInput::from_ymd_hms(1985, 10, 6, 19, 30, 0, 540).unwrap();
        let text = chart(&Engine::bundled().calculate(&input));
        assert!(text.contains("Pillars      乙丑    乙酉    戊寅    壬戌"), "{text}");
        assert!(text.contains("海中金"));
        assert!(text.contains("立春 1985 at 1985-02-03T21:11:48Z (precise)"));
        assert!(text.contains("六害 酉戌"));
        assert!(!text.contains("Trace"));
    }

    #[test]
    fn chart_text_with_trace() {
        let input = BirthInput::from_ymd_hms(1985, 10, 6, 19, 30, 0, 540).unwrap();
        let text = chart(&Engine::bundled().with_trace(true).calculate(&input));
        assert!(text.contains("Trace\n  [year]"), "{text}");
    }
}
