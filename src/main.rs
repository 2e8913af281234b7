use tickwire::{spawn, Agenda, Counter, Delay, FullAdder, HalfAdder, Probe, SimResult, Wire};
use tracing::info;

fn main() -> SimResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("═══════════════════════════════════════════════════════");
    println!("  tickwire — discrete-event signal propagation demo");
    println!("═══════════════════════════════════════════════════════");
    println!();

    half_adder()?;
    full_adder()?;
    counter()?;

    println!();
    println!("  ✓ Demo complete.");
    Ok(())
}

fn half_adder() -> SimResult<()> {
    let agenda = Agenda::new();
    let (a, b) = (Wire::named("a"), Wire::named("b"));
    let (sum, carry) = (Wire::named("sum"), Wire::named("carry"));
    let adder = HalfAdder::new(&agenda, Delay::ONE, &a, &b, &sum, &carry)?;
    let sum_probe = Probe::attach("sum", &agenda, &sum);
    let carry_probe = Probe::attach("carry", &agenda, &carry);

    let start = agenda.now();
    a.set(true)?;
    b.set(true)?;
    agenda.run_for(adder.settle_ticks())?;

    println!(
        "  Half adder, a=1 b=1 (sum settled after {} ticks):",
        sum_probe.settled_after(start).unwrap_or(0)
    );
    for change in sum_probe.changes() {
        println!("    sum   {}", change);
    }
    for change in carry_probe.changes() {
        println!("    carry {}", change);
    }
    Ok(())
}

fn full_adder() -> SimResult<()> {
    let agenda = Agenda::new();
    let wires: Vec<Wire<bool>> = ["a", "b", "c_in", "sum", "c_out"]
        .into_iter()
        .map(Wire::named)
        .collect();
    let adder = FullAdder::new(
        &agenda,
        Delay::ONE,
        &wires[0],
        &wires[1],
        &wires[2],
        &wires[3],
        &wires[4],
    )?;

    println!("  Full adder truth table:");
    for bits in 0u8..8 {
        wires[0].set(bits & 4 != 0)?;
        wires[1].set(bits & 2 != 0)?;
        wires[2].set(bits & 1 != 0)?;
        let taken = agenda.run_until_idle(adder.settle_ticks() * 2)?;
        println!(
            "    {:03b} → sum={} carry={}  (settled in {} ticks, now {})",
            bits,
            adder.sum().get_signal(),
            adder.carry_out().get_signal(),
            taken,
            agenda.now(),
        );
    }
    Ok(())
}

fn counter() -> SimResult<()> {
    let agenda = Agenda::new();
    let count = Wire::named("count");
    let _counter = spawn(Counter::new(&agenda, Delay::ONE, &count, 0, 1))?;
    let probe = Probe::attach("count", &agenda, &count);

    agenda.run_for(5)?;
    info!(executed = agenda.executed(), now = %agenda.now(), "counter run finished");
    println!(
        "  Counter after 5 ticks: {}  ({} changes observed)",
        count.get_signal(),
        probe.len()
    );
    Ok(())
}
