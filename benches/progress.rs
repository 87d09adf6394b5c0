use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use dynaform::forms::{compute_progress, FieldValues, FormRenderer};
use dynaform::registry::{FieldDescriptor, FieldKind, FormRegistry, FormSchema, ADDRESS_INFO};
use dynaform::session::SessionController;

fn wide_schema(field_count: usize) -> FormSchema {
    let fields = (0..field_count)
        .map(|idx| {
            let field = FieldDescriptor::new(format!("field{idx}"), format!("Field {idx}"), FieldKind::Text);
            if idx % 4 == 0 {
                field.optional()
            } else {
                field
            }
        })
        .collect();
    FormSchema::new("wide", "Wide Form", fields)
}

fn half_filled(schema: &FormSchema) -> FieldValues {
    schema
        .fields
        .iter()
        .step_by(2)
        .map(|field| (field.name.clone(), "value".into()))
        .collect()
}

fn bench_compute_progress(c: &mut Criterion) {
    let schema = wide_schema(black_box(500));
    let values = half_filled(&schema);

    c.bench_function("compute_progress_500_fields", |b| {
        b.iter(|| compute_progress(black_box(&schema), black_box(&values)))
    });
}

fn bench_set_value(c: &mut Criterion) {
    let schema = FormRegistry::builtin()
        .lookup(ADDRESS_INFO)
        .expect("address schema");

    c.bench_function("renderer_set_value", |b| {
        b.iter_batched(
            || FormRenderer::new(schema.clone(), FieldValues::new()),
            |mut form| {
                form.set_value("street", "MG Road").expect("set street");
                form.set_value("state", "kerala").expect("set state");
                form
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_submit_records(c: &mut Criterion) {
    c.bench_function("session_submit_1k", |b| {
        b.iter_batched(
            || SessionController::new(FormRegistry::builtin()),
            |mut session| {
                for idx in 0..1_000 {
                    session.select_form_type(ADDRESS_INFO).expect("select");
                    let mut form = session.open_renderer().expect("renderer");
                    form.set_value("street", "MG Road").expect("street");
                    form.set_value("city", "Pune").expect("city");
                    form.set_value("state", "Kerala").expect("state");
                    form.set_value("zipCode", &idx.to_string()).expect("zip");
                    form.submit(|values| session.submit(values))
                        .expect("valid form")
                        .expect("stored");
                }
                session
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_compute_progress,
    bench_set_value,
    bench_submit_records
);
criterion_main!(benches);
