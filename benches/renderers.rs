use criterion::{criterion_group, criterion_main, Criterion};
use mazegen::{
    config::Config,
    generation::MazeGenerator,
    grid::Grid,
    grid_displays::TextRenderer,
    output,
    rendering::RenderGrid,
};

fn solved_maze() -> Grid {
    let config = Config::new(100, 100, (0, 0), (99, 99), "maze.txt".into(), false, Some(3)).unwrap();
    MazeGenerator::new(config).generate().unwrap()
}

fn bench_render_grid_100(c: &mut Criterion) {
    let maze = solved_maze();
    c.bench_function("render_grid_100", move |b| {
        b.iter(|| RenderGrid::from_grid(&maze))
    });
}

fn bench_text_render_100(c: &mut Criterion) {
    let maze = solved_maze();
    let mut renderer = TextRenderer::new();
    renderer.toggle_path();
    c.bench_function("text_render_100", move |b| {
        b.iter(|| renderer.render(&maze))
    });
}

fn bench_hex_dump_100(c: &mut Criterion) {
    let maze = solved_maze();
    let (entry, exit) = (maze.path()[0], maze.path()[maze.path().len() - 1]);
    c.bench_function("hex_dump_100", move |b| {
        b.iter(|| output::hex_dump(&maze, entry, exit))
    });
}

criterion_group!(benches, bench_render_grid_100, bench_text_render_100, bench_hex_dump_100);
criterion_main!(benches);
