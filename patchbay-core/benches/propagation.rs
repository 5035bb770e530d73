//! Microbenchmarks for push fan-out, pull derivation, and wiring churn.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use patchbay_core::port::Port;
use patchbay_core::socket::Cardinality;

fn push_fan_out(c: &mut Criterion) {
    let source = Port::output(Cardinality::Multiple);
    let sinks: Vec<Port<u64>> = (0..64)
        .map(|_| Port::input(Cardinality::Single))
        .collect();
    for sink in &sinks {
        source.connect(sink);
    }

    c.bench_function("push_fan_out_64", |b| {
        b.iter(|| source.update(black_box(7u64)))
    });
}

fn pull_collect(c: &mut Criterion) {
    let sink = Port::<u64>::input(Cardinality::Multiple);
    let sources: Vec<Port<u64>> = (0..64)
        .map(|_| Port::output(Cardinality::Single))
        .collect();
    for (value, source) in sources.iter().enumerate() {
        sink.connect(source);
        source.update(value as u64);
    }

    c.bench_function("pull_collect_64", |b| b.iter(|| black_box(sink.get_value())));
}

fn wiring_churn(c: &mut Criterion) {
    let source = Port::<u64>::output(Cardinality::Multiple);
    let sink = Port::<u64>::input(Cardinality::Single);

    c.bench_function("connect_disconnect", |b| {
        b.iter(|| {
            source.connect(&sink);
            source.disconnect(&sink);
        })
    });
}

criterion_group!(benches, push_fan_out, pull_collect, wiring_churn);
criterion_main!(benches);
