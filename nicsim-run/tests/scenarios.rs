use std::io::Cursor;

use nicsim::sim::{Simulator, Stats};
use nicsim::wire::{Checksum, EthernetRepr, Ipv4Repr};
use nicsim_run::config::Parameters;
use nicsim_run::Report;

const PARAMS: &str = "00:11:22:33:44:55\n10.0.0.1/24\nSRC:1000,DST:2000\n";

fn simulator(checksum: Checksum) -> Simulator {
    let params = Parameters::parse(Cursor::new(PARAMS)).unwrap();
    Simulator::new(params.into_interface(checksum))
}

/// A network packet with a correct checksum.
fn network(src: &str, dst: &str, ttl: u32, address: u32, data: &str) -> String {
    let text = format!("{}|{}|{}|0|1000|2000|{}|{}", src, dst, ttl, address, data);
    let mut repr = Ipv4Repr::parse(&text);
    repr.fill_checksum();
    repr.to_string()
}

fn frame(dst: &str, payload: &str) -> String {
    let text = format!("aa:bb:cc:dd:ee:ff|{}|{}|0", dst, payload);
    let mut repr = EthernetRepr::parse(&text);
    repr.fill_checksum();
    repr.to_string()
}

fn run(sim: &mut Simulator, lines: &[String]) -> Stats {
    sim.run(Cursor::new(lines.join("\n"))).unwrap()
}

#[test]
fn deposit_into_port() {
    let mut sim = simulator(Checksum::Manual);
    let stats = run(&mut sim, &[network("93.0.0.5", "10.0.0.1", 5, 0, "41 42")]);
    assert_eq!(stats.deposited_local, 1);

    let report = Report::from_simulator(&sim).to_string();
    let mut lines = report.lines();
    assert_eq!(lines.next(), Some("LOCAL DRAM:"));
    assert!(lines.next().unwrap().starts_with("1000 2000: 41 42 00 00 "));
    assert_eq!(lines.next(), Some(""));
    assert_eq!(lines.next(), Some("RQ:"));
    assert_eq!(lines.next(), Some(""));
    assert_eq!(lines.next(), Some("TQ:"));
    assert_eq!(lines.next(), None);
}

#[test]
fn outgoing_source_rewritten() {
    let mut sim = simulator(Checksum::Manual);
    let stats = run(&mut sim, &["10.0.0.2|93.0.0.5|5|696|1000|2000|0|41 42".to_owned()]);
    assert_eq!(stats.enqueued_tq, 1);

    let out = Ipv4Repr::parse(&sim.tq()[0]);
    assert_eq!(out.src_addr.to_string(), "10.0.0.1");
    assert_eq!(out.dst_addr.to_string(), "93.0.0.5");
    assert_eq!(out.ttl, 4);
    assert!(out.verify_checksum());

    let report = Report::from_simulator(&sim).to_string();
    assert!(report.starts_with("RQ:\n\nTQ:\n10.0.0.1|93.0.0.5|4|"));
}

#[test]
fn expired_in_transit() {
    let mut sim = simulator(Checksum::Manual);
    let stats = run(&mut sim, &[
        network("93.0.0.5", "10.0.0.2", 1, 0, "41"),
        network("10.0.0.2", "93.0.0.5", 1, 0, "41"),
    ]);
    assert_eq!(stats.dropped, 2);
    assert!(sim.rq().is_empty());
    assert!(sim.tq().is_empty());
}

#[test]
fn frame_for_other_station() {
    let mut sim = simulator(Checksum::Manual);
    let inner = network("93.0.0.5", "10.0.0.2", 5, 0, "41");
    let stats = run(&mut sim, &[
        frame("00:11:22:33:44:56", &inner),
        frame("01:11:22:33:44:55", &inner),
        frame("00:11:22:33:44:55", &inner),
    ]);
    assert_eq!(stats.dropped, 2);
    assert_eq!(stats.enqueued_rq, 1);
    assert!(sim.rq()[0].starts_with("93.0.0.5|10.0.0.2|4|"));
}

#[test]
fn local_traffic_ignored() {
    let mut sim = simulator(Checksum::Manual);
    let stats = run(&mut sim, &[
        network("10.0.0.2", "10.0.0.3", 5, 0, "41"),
        network("10.0.0.2", "10.0.0.1", 5, 0, "41"),
    ]);
    assert_eq!(stats.dropped, 2);
    assert!(sim.ports().iter().all(|port| port.is_zeroed()));
}

#[test]
fn address_out_of_window() {
    let mut sim = simulator(Checksum::Manual);
    let stats = run(&mut sim, &[
        "1000|2000|64|ff".to_owned(),
        "1000|2000|63|ee dd".to_owned(),
    ]);
    assert_eq!(stats.dropped, 1);
    assert_eq!(stats.deposited_local, 1);

    let memory = sim.ports().find(1000, 2000).unwrap().memory();
    assert_eq!(memory[63], 0xee);
    assert!(memory[..63].iter().all(|&b| b == 0));
}

#[test]
fn checksums_ignored() {
    let bad = "10.0.0.2|93.0.0.5|5|1|1000|2000|0|41 42".to_owned();

    let mut sim = simulator(Checksum::Manual);
    assert_eq!(run(&mut sim, &[bad.clone()]).dropped, 1);

    let mut sim = simulator(Checksum::Ignored);
    assert_eq!(run(&mut sim, &[bad]).enqueued_tq, 1);
    // Forwarded packets always leave with a correct checksum.
    assert!(Ipv4Repr::parse(&sim.tq()[0]).verify_checksum());
}

#[test]
fn queues_keep_arrival_order() {
    let mut sim = simulator(Checksum::Manual);
    let lines: Vec<String> = (2..6)
        .map(|host| network("93.0.0.5", &format!("10.0.0.{}", host), 9, 0, "00"))
        .collect();
    run(&mut sim, &lines);

    let hosts: Vec<String> = sim.rq().iter()
        .map(|text| Ipv4Repr::parse(text).dst_addr.to_string())
        .collect();
    assert_eq!(hosts, vec!["10.0.0.2", "10.0.0.3", "10.0.0.4", "10.0.0.5"]);
}

#[test]
fn garbage_is_dropped() {
    let mut sim = simulator(Checksum::Manual);
    let stats = run(&mut sim, &[
        "".to_owned(),
        "hello world".to_owned(),
        "||||".to_owned(),
        "a.b|c|d".to_owned(),
    ]);
    assert_eq!(stats.total(), 3);
    assert_eq!(stats.dropped, 3);
}
