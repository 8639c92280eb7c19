//! JSON shape of a calculation result.

use sizhu_chart::{BirthInput, Engine};

fn input() -> BirthInput {
    BirthInput::from_ymd_hms(1985, 10, 6, 19, 30, 0, 540).unwrap()
}

/// Pillars, na-yin and sources serialize with their traditional names.
#[test]
fn result_json_shape() {
    let r = Engine::bundled().calculate(&input());
    let v = serde_json::to_value(&r).unwrap();

    assert_eq!(v["pillars"]["year"]["stem"], "乙");
    assert_eq!(v["pillars"]["year"]["branch"], "丑");
    assert_eq!(v["nayin"]["day"]["name"], "城頭土");
    assert_eq!(v["nayin"]["day"]["element"], "earth");
    assert_eq!(v["hidden_stems"]["year"][0]["type"], "本氣");
    assert_eq!(v["boundaries"]["year_source"], "precise");
    assert_eq!(v["yin_yang"]["yang_count"], 4);
    assert!(v["interactions"].as_array().is_some_and(|a| !a.is_empty()));
    assert!(v.get("trace").is_none());
}

/// The trace appears only when enabled.
#[test]
fn trace_serialized_when_enabled() {
    let r = Engine::bundled().with_trace(true).calculate(&input());
    let v = serde_json::to_value(&r).unwrap();
    let trace = v["trace"].as_array().unwrap();
    assert!(trace.iter().any(|e| e["stage"] == "year"));
    assert!(trace.iter().all(|e| e["fallback"] == false));
}
