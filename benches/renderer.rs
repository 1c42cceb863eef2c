use career_timeline::config::LayoutConfig;
use career_timeline::layout::{compute_layout, prepare_chart_data};
use career_timeline::parser::parse_resume;
use career_timeline::path::round_path_corners;
use career_timeline::render::render_svg;
use career_timeline::theme::Theme;
use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn generated_resume(items: usize) -> String {
    let entry = |idx: usize, kind: &str| {
        let year = 1990 + (idx / 3) as i32;
        let month = 1 + (idx * 5) % 12;
        let span = 1 + idx % 4;
        let end = if idx % 11 == 0 {
            "-".to_string()
        } else {
            format!("{:04}-{:02}-15", year + span as i32, month)
        };
        format!(
            r#"{{"title": "{kind} {idx}", "place": "Place {p}", "type": "{t}", "dateStart": "{year:04}-{month:02}-01", "dateEnd": "{end}",
               "responsibilities": [{{"title": "Task {idx}", "problemsAddressed": ["Problem {q}"], "tech": {{"Tech {r}": ["Child {idx}"]}}}}]}}"#,
            p = idx % 7,
            t = if idx % 2 == 0 { "paidJob" } else { "online" },
            q = idx % 5,
            r = idx % 9,
        )
    };
    let work: Vec<String> = (0..items).map(|idx| entry(idx, "Job")).collect();
    let learning: Vec<String> = (0..items / 2).map(|idx| entry(idx, "Course")).collect();
    format!(
        r#"{{"work": [{}], "learning": [{}]}}"#,
        work.join(","),
        learning.join(",")
    )
}

fn bench_prepare(c: &mut Criterion) {
    let now = NaiveDate::from_ymd_opt(2030, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let config = LayoutConfig::default();
    let theme = Theme::classic();
    let mut group = c.benchmark_group("prepare");
    for size in [10usize, 100, 1000] {
        let input = generated_resume(size);
        let resume = parse_resume(&input).expect("generated resume parses");
        group.bench_with_input(BenchmarkId::new("prepare_chart_data", size), &resume, |b, resume| {
            b.iter(|| {
                let chart = prepare_chart_data(black_box(resume.clone()), now, &config)
                    .expect("prepare failed");
                black_box(chart)
            })
        });
        group.bench_with_input(BenchmarkId::new("end_to_end", size), &input, |b, input| {
            b.iter(|| {
                let resume = parse_resume(black_box(input)).expect("parse failed");
                let chart = prepare_chart_data(resume, now, &config).expect("prepare failed");
                let layout = compute_layout(&chart, &theme, &config, 1200.0);
                black_box(render_svg(&layout, &theme))
            })
        });
    }
    group.finish();
}

fn bench_round_corners(c: &mut Criterion) {
    let mut path = String::from("M0,100");
    for idx in 1..200 {
        let y = if idx % 2 == 0 { 100 } else { 60 };
        path.push_str(&format!("L{},{}", idx * 10, y));
    }
    c.bench_function("round_path_corners/zigzag_200", |b| {
        b.iter(|| round_path_corners(black_box(&path), 5.0, &[]).expect("round failed"))
    });
}

criterion_group!(benches, bench_prepare, bench_round_corners);
criterion_main!(benches);
