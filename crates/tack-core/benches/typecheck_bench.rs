use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tack_core::{parser, resolve, typecheck};

const FACTORIAL: &str = r#"
    fn fact(int n) -> int {
        if (n <= 1) {
            return 1;
        }
        return n * fact(n - 1);
    }

    fn main() -> void {
        int x;
        read x;
        write fact(x);
    }
"#;

/// `count` functions, each calling the previous one
fn generated_program(count: usize) -> String {
    let mut source = String::from("int total;\nfn f0(int n) -> int { return n; }\n");
    for i in 1..count {
        source.push_str(&format!(
            "fn f{i}(int n) -> int {{\n    int acc;\n    acc = f{}(n) + {i};\n    \
             while (acc > 100 && n != 0) {{ acc = acc / 2; }}\n    total = total + acc;\n    \
             return acc;\n}}\n",
            i - 1
        ));
    }
    source
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse factorial", |b| {
        b.iter(|| parser::parse(black_box(FACTORIAL), "bench.tack"))
    });
}

fn bench_resolve(c: &mut Criterion) {
    let ast = parser::parse(FACTORIAL, "bench.tack").expect("parse failed");
    c.bench_function("resolve factorial", |b| {
        b.iter(|| resolve::resolve(black_box(&ast)))
    });
}

fn bench_typecheck_small(c: &mut Criterion) {
    let ast = parser::parse(FACTORIAL, "bench.tack").expect("parse failed");
    let names = resolve::resolve(&ast).expect("resolve failed");
    c.bench_function("typecheck factorial", |b| {
        b.iter(|| typecheck::analyze(black_box(&ast), black_box(&names)))
    });
}

fn bench_typecheck_large(c: &mut Criterion) {
    let source = generated_program(200);
    let ast = parser::parse(&source, "bench.tack").expect("parse failed");
    let names = resolve::resolve(&ast).expect("resolve failed");
    c.bench_function("typecheck 200 functions", |b| {
        b.iter(|| typecheck::analyze(black_box(&ast), black_box(&names)))
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_resolve,
    bench_typecheck_small,
    bench_typecheck_large
);
criterion_main!(benches);
