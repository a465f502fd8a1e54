//! End-to-end AP resolution over real files

use opsi_stats::{ApSource, MonthKey, OpsiMonthStats};

mod common;
use common::{mid_month, purchase_log, set_mtime, Fixture};

fn may_2024() -> MonthKey {
    MonthKey::new(2024, 5).unwrap()
}

#[test]
fn test_precomputed_value_is_authoritative() -> anyhow::Result<()> {
    let fx = Fixture::new()?;
    fx.write_stats(r#"{"2024-05-akashi-ap": 300, "2024-05-akashi-ap-entries": [1, 2]}"#)?;
    let log = fx.write_log("alas.log", purchase_log(40, 3))?;
    set_mtime(&log, mid_month(2024, 5))?;

    let stats = OpsiMonthStats::from_root(fx.root());
    let estimate = stats.resolve_ap(&may_2024(), "opsi_akashi");
    assert_eq!(estimate.amount, 300);
    assert_eq!(estimate.source, ApSource::Structured);
    Ok(())
}

#[test]
fn test_precomputed_zero_stops_the_chain() -> anyhow::Result<()> {
    let fx = Fixture::new()?;
    fx.write_stats(r#"{"2024-05-akashi-ap": 0}"#)?;
    let log = fx.write_log("alas.log", purchase_log(40, 3))?;
    set_mtime(&log, mid_month(2024, 5))?;

    let stats = OpsiMonthStats::from_root(fx.root());
    let estimate = stats.resolve_ap(&may_2024(), "opsi_akashi");
    assert_eq!(estimate.amount, 0);
    assert_eq!(estimate.source, ApSource::Structured);
    Ok(())
}

#[test]
fn test_entries_are_summed() -> anyhow::Result<()> {
    let fx = Fixture::new()?;
    fx.write_stats(r#"{"2024-05-akashi-ap-entries": [3, {"amount": 5}, {"amount": "bad"}]}"#)?;

    let ap = OpsiMonthStats::from_root(fx.root()).compute_monthly_cl1_akashi_ap(
        Some(2024),
        Some(5),
        None,
    )?;
    assert_eq!(ap, 8);
    Ok(())
}

#[test]
fn test_negative_store_value_clamps_to_zero() -> anyhow::Result<()> {
    let fx = Fixture::new()?;
    fx.write_stats(r#"{"2024-05-akashi-ap": -40}"#)?;

    let estimate = OpsiMonthStats::from_root(fx.root()).resolve_ap(&may_2024(), "opsi_akashi");
    assert_eq!(estimate.amount, 0);
    assert_eq!(estimate.source, ApSource::Structured);
    Ok(())
}

#[test]
fn test_logs_used_when_store_is_silent() -> anyhow::Result<()> {
    let fx = Fixture::new()?;
    fx.write_stats(r#"{"2024-05": 80, "2024-05-akashi-ap-entries": []}"#)?;
    let log = fx.write_log("alas.log", purchase_log(40, 3))?;
    set_mtime(&log, mid_month(2024, 5))?;
    fx.write_csv("opsi_akashi", "drops.csv", "1,Action Point,+50\n")?;

    let estimate = OpsiMonthStats::from_root(fx.root()).resolve_ap(&may_2024(), "opsi_akashi");
    assert_eq!(estimate.amount, 120);
    assert_eq!(estimate.source, ApSource::Logs);
    Ok(())
}

#[test]
fn test_log_total_accumulates_across_files() -> anyhow::Result<()> {
    let fx = Fixture::new()?;
    for (name, base) in [("a.log", 40), ("b.txt", 60), ("c.LOG", 10)] {
        let log = fx.write_log(name, purchase_log(base, 1))?;
        set_mtime(&log, mid_month(2024, 5))?;
    }
    // Not a log extension
    let other = fx.write_log("notes.md", purchase_log(1000, 1))?;
    set_mtime(&other, mid_month(2024, 5))?;

    let estimate = OpsiMonthStats::from_root(fx.root()).resolve_ap(&may_2024(), "opsi_akashi");
    assert_eq!(estimate.amount, 110);
    assert_eq!(estimate.source, ApSource::Logs);
    Ok(())
}

#[test]
fn test_unconfirmed_click_falls_through_to_csv() -> anyhow::Result<()> {
    let fx = Fixture::new()?;
    let mut text = String::from("Click ActionPoint40_3x\n");
    for i in 0..30 {
        text.push_str(&format!("INFO | idle {i}\n"));
    }
    text.push_str("Shop buy finished\n");
    let log = fx.write_log("alas.log", text)?;
    set_mtime(&log, mid_month(2024, 5))?;
    fx.write_csv(
        "opsi_akashi",
        "drops.csv",
        "1,Action Point,+50\n2,ActionPoint,N/A\n3,Coins,900\n",
    )?;

    let estimate = OpsiMonthStats::from_root(fx.root()).resolve_ap(&may_2024(), "opsi_akashi");
    assert_eq!(estimate.amount, 50);
    assert_eq!(estimate.source, ApSource::Csv);
    Ok(())
}

#[test]
fn test_logs_from_other_months_are_ignored() -> anyhow::Result<()> {
    let fx = Fixture::new()?;
    let log = fx.write_log("alas.log", purchase_log(40, 3))?;
    set_mtime(&log, mid_month(2024, 4))?;

    let estimate = OpsiMonthStats::from_root(fx.root()).resolve_ap(&may_2024(), "opsi_akashi");
    assert_eq!(estimate.amount, 0);
    assert_eq!(estimate.source, ApSource::Csv);

    let april = MonthKey::new(2024, 4)?;
    let estimate = OpsiMonthStats::from_root(fx.root()).resolve_ap(&april, "opsi_akashi");
    assert_eq!(estimate.amount, 120);
    Ok(())
}

#[test]
fn test_gbk_log_is_decoded() -> anyhow::Result<()> {
    let fx = Fixture::new()?;
    // "购买" (purchase) in GBK keeps the file from being valid UTF-8
    let mut bytes = vec![0xB9, 0xBA, 0xC2, 0xF2, b'\n'];
    bytes.extend_from_slice(purchase_log(25, 2).as_bytes());
    let log = fx.write_log("alas.log", bytes)?;
    set_mtime(&log, mid_month(2024, 5))?;

    let estimate = OpsiMonthStats::from_root(fx.root()).resolve_ap(&may_2024(), "opsi_akashi");
    assert_eq!(estimate.amount, 50);
    Ok(())
}

#[test]
fn test_log_cut_mid_character_still_counts() -> anyhow::Result<()> {
    let fx = Fixture::new()?;
    // UTF-8 log whose last character is only half written
    let mut bytes = "12:00 | INFO | 中Click ActionPoint40_3x\n12:01 | INFO | Shop buy finished\n"
        .as_bytes()
        .to_vec();
    bytes.push(0xE4);
    let log = fx.write_log("alas.log", bytes)?;
    set_mtime(&log, mid_month(2024, 5))?;

    let estimate = OpsiMonthStats::from_root(fx.root()).resolve_ap(&may_2024(), "opsi_akashi");
    assert_eq!(estimate.amount, 120);
    assert_eq!(estimate.source, ApSource::Logs);
    Ok(())
}

#[test]
fn test_csv_exports_in_several_encodings() -> anyhow::Result<()> {
    let fx = Fixture::new()?;
    fx.write_csv("opsi_akashi", "utf8.csv", "a,Action Point,+50\n")?;
    // "行动力" then the ASCII item name, GBK encoded
    let mut gbk = vec![0xD0, 0xD0, 0xB6, 0xAF, 0xC1, 0xA6];
    gbk.extend_from_slice(b",ActionPoint,x30\n");
    fx.write_csv("opsi_akashi", "gbk.CSV", gbk)?;
    fx.write_csv("opsi_akashi", "latin1.csv", b"\xff,action points,7\n".to_vec())?;
    fx.write_csv("opsi_akashi", "ignored.txt", "a,Action Point,1000\n")?;
    fx.write_csv("other_campaign", "drops.csv", "a,Action Point,1000\n")?;

    let estimate = OpsiMonthStats::from_root(fx.root()).resolve_ap(&may_2024(), "opsi_akashi");
    assert_eq!(estimate.amount, 87);
    assert_eq!(estimate.source, ApSource::Csv);

    let other = OpsiMonthStats::from_root(fx.root()).resolve_ap(&may_2024(), "other_campaign");
    assert_eq!(other.amount, 1000);
    Ok(())
}

#[test]
fn test_nothing_anywhere_is_zero() -> anyhow::Result<()> {
    let fx = Fixture::new()?;
    fx.write_stats("{broken")?;

    let ap = opsi_stats::compute_monthly_cl1_akashi_ap(fx.root(), Some(2024), Some(5), None)?;
    assert_eq!(ap, 0);
    Ok(())
}

#[test]
fn test_repeated_calls_agree() -> anyhow::Result<()> {
    let fx = Fixture::new()?;
    let stats_path = fx.write_stats(r#"{"2024-05-akashi-ap-entries": [10, {"amount": 15}]}"#)?;
    let before = std::fs::read(&stats_path)?;

    let stats = OpsiMonthStats::from_root(fx.root());
    let first = stats.compute_monthly_cl1_akashi_ap(Some(2024), Some(5), None)?;
    let second = stats.compute_monthly_cl1_akashi_ap(Some(2024), Some(5), None)?;
    assert_eq!(first, 25);
    assert_eq!(first, second);
    assert_eq!(std::fs::read(&stats_path)?, before);
    Ok(())
}

#[test]
fn test_invalid_arguments_are_errors() -> anyhow::Result<()> {
    let fx = Fixture::new()?;
    let stats = OpsiMonthStats::from_root(fx.root());
    assert!(stats.compute_monthly_cl1_akashi_ap(Some(2024), Some(13), None).is_err());
    assert!(stats
        .compute_monthly_cl1_akashi_ap(Some(2024), Some(5), Some("../log"))
        .is_err());
    Ok(())
}
