// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use iced_uml::diagram::{encoding, render, DiagramSource, RenderFormat};
use iced_uml::diagram::url::DEFAULT_SERVER_URL;
use std::hint::black_box;

/// A class diagram roughly the size of a typical model answer.
fn sample_source() -> String {
    let mut text = String::from("@startuml\n");
    for i in 0..40 {
        text.push_str(&format!(
            "class Entity{i} {{\n  +id: Uuid\n  +name: String\n}}\nEntity{i} --> Entity{}\n",
            i + 1
        ));
    }
    text.push_str("@enduml\n");
    text
}

fn encoding_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");
    let text = sample_source();
    let token = encoding::encode(&text);
    let source = DiagramSource::edited(text.clone());

    group.bench_function("encode_class_diagram", |b| {
        b.iter(|| black_box(encoding::encode(black_box(&text))));
    });

    group.bench_function("decode_class_diagram", |b| {
        b.iter(|| black_box(encoding::decode(black_box(&token))));
    });

    group.bench_function("render_url", |b| {
        b.iter(|| {
            black_box(render(
                DEFAULT_SERVER_URL,
                black_box(&source),
                RenderFormat::Svg,
            ))
        });
    });

    group.finish();
}

criterion_group!(benches, encoding_benchmark);
criterion_main!(benches);
