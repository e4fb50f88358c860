use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use editor_core_actions::search::{self, SearchOptions};
use editor_core_actions::{Action, Buffer, Location, Pane, Session, Settings};

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        out.push_str(&format!(
            "{i:06} the quick brown fox jumps over the lazy dog (editor-core-actions line)\n"
        ));
    }
    out.pop();
    out
}

fn bench_find_next_wraps(c: &mut Criterion) {
    let buf = Buffer::new(&large_text(50_000), Settings::default());
    let from = Location::new(40_000, 0);
    c.bench_function("search/find_next_wraparound", |b| {
        b.iter(|| {
            let found = search::find_next(
                &buf.text,
                black_box("000123 the"),
                from,
                true,
                SearchOptions::default(),
            )
            .unwrap();
            black_box(found);
        })
    });
}

fn bench_spawn_multi_cursor(c: &mut Criterion) {
    let text = large_text(5_000);
    c.bench_function("multicursor/spawn_50", |b| {
        b.iter_batched(
            || {
                let mut pane = Pane::new(Buffer::new(&text, Settings::default()), 120, 40);
                pane.buf.cursors.primary_mut().loc = Location::new(0, 11);
                (pane, Session::default())
            },
            |(mut pane, mut session)| {
                for _ in 0..50 {
                    pane.execute(&mut session, Action::SpawnMultiCursor);
                }
                black_box(pane.buf.cursors.len());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_page_through_soft_wrapped(c: &mut Criterion) {
    let settings = Settings {
        soft_wrap: true,
        word_wrap: true,
        ..Settings::default()
    };
    let text = large_text(10_000);
    c.bench_function("view/page_down_soft_wrap", |b| {
        b.iter_batched(
            || {
                (
                    Pane::new(Buffer::new(&text, settings.clone()), 40, 50),
                    Session::default(),
                )
            },
            |(mut pane, mut session)| {
                for _ in 0..100 {
                    pane.execute(&mut session, Action::PageDown);
                }
                black_box(pane.view.start_line);
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_find_next_wraps,
    bench_spawn_multi_cursor,
    bench_page_through_soft_wrapped
);
criterion_main!(benches);
