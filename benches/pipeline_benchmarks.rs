// Copyright 2025 Cowboy AI, LLC.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hexagram_branching::{
    AnalyzeRequest, BranchingEngine, ClassicalHexagramRepository, ConcernSignal, ConcernTopic,
    ExperienceLevel, SituationClassifier, UserProfile, Valence,
};

fn decision_signal() -> ConcernSignal {
    ConcernSignal::new()
        .with_keywords(["urgent", "career", "choose", "boss"])
        .with_topic(ConcernTopic::Decision)
        .with_topic(ConcernTopic::Relationship)
        .with_emotion(Valence::Negative, 0.6)
}

fn benchmark_classification(c: &mut Criterion) {
    let classifier = SituationClassifier::new();
    let signal = decision_signal();
    c.bench_function("classify_decision_signal", |b| {
        b.iter(|| classifier.classify(black_box(&signal)))
    });
}

fn benchmark_full_pipeline(c: &mut Criterion) {
    let engine = BranchingEngine::new(Arc::new(ClassicalHexagramRepository::new()));
    let mut group = c.benchmark_group("analyze");

    for level in [
        ExperienceLevel::Beginner,
        ExperienceLevel::Intermediate,
        ExperienceLevel::Advanced,
    ] {
        let request =
            AnalyzeRequest::new(decision_signal(), 1).with_user(UserProfile::new(level));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{level:?}")),
            &request,
            |b, request| b.iter(|| engine.analyze(black_box(request))),
        );
    }

    group.finish();
}

fn benchmark_all_bases(c: &mut Criterion) {
    let engine = BranchingEngine::new(Arc::new(ClassicalHexagramRepository::new()));
    let signal = decision_signal();
    c.bench_function("analyze_all_64_bases", |b| {
        b.iter(|| {
            for id in 1..=64u8 {
                black_box(engine.analyze(&AnalyzeRequest::new(signal.clone(), id)));
            }
        })
    });
}

criterion_group!(
    benches,
    benchmark_classification,
    benchmark_full_pipeline,
    benchmark_all_bases
);

criterion_main!(benches);
