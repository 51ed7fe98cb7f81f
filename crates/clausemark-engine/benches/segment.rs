use std::hint::black_box;

use clausemark_engine::{
    LoadOptions, PulldownRenderer, SegmentOptions, ViewState, extract_glossary, render_view,
    segment,
};
use criterion::{Criterion, criterion_group, criterion_main};

fn generate_policy(clauses: usize) -> String {
    let mut content = String::from("# Policy\n\nIntroductory text for the whole document.\n\n");
    for i in 0..clauses {
        let audience = if i % 2 == 0 { "staff" } else { "students" };
        content.push_str(&format!(
            "<!--\nrule_type: policy\napplies_to: {audience}\n-->\n## Rule {i}\n\nA Board Member reviews rule {i} before each Quorum vote.\n\n"
        ));
    }
    content.push_str("## Glossary\n\n- **Board** - the governing body\n- **Board Member** - a seated member\n\n[Quorum]: the minimum attendance\n");
    content
}

fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation");
    group.sample_size(20);

    let content = generate_policy(500);
    let options = SegmentOptions::default();
    group.bench_function("segment_forward", |b| {
        b.iter(|| black_box(segment(black_box(&content), &options)));
    });
    group.bench_function("extract_glossary", |b| {
        b.iter(|| black_box(extract_glossary(black_box(&content))));
    });

    group.finish();
}

fn bench_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("view");
    group.sample_size(10);

    let content = generate_policy(500);
    let options = LoadOptions::default();
    group.bench_function("load", |b| {
        b.iter(|| black_box(ViewState::load(black_box(&content), &options)));
    });

    let view = ViewState::load(&content, &options);
    let renderer = PulldownRenderer::new();
    group.bench_function("render_view", |b| {
        b.iter(|| black_box(render_view(&view, &renderer)));
    });

    group.finish();
}

criterion_group!(benches, bench_segmentation, bench_view);
criterion_main!(benches);
