use forklift_ga::{
  warehouse::Cell, Error, GaConfig, GaEvent, Layout, WarehouseProblem,
};
use tracing_subscriber::EnvFilter;

const GRID: &str = "
  7 9
  3 0 0 0 0 0 0 0 0
  0 0 1 2 0 1 2 1 0
  0 0 2 1 0 2 1 1 0
  3 0 1 1 0 1 1 2 0
  0 0 2 1 0 1 2 1 0
  3 0 0 0 0 0 0 0 0
  0 0 0 0 0 0 0 0 4
";

const PARAMETERS: &str = "
  # run with RUST_LOG=forklift_ga=debug to follow the generations
  Population_size: 100
  Max_generations: 100
  Selection: tournament
  Tournament_size: 4
  Recombination: pmx
  Recombination_probability: 0.7
  Mutation: insert
  Mutation_probability: 0.1
  Allow_Collisions: no
  Seed: 7
  Parallel: yes
";

fn main() -> Result<(), Error> {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .try_init();

  let config = GaConfig::from_parameters(PARAMETERS)?;
  let layout: Layout = GRID.parse()?;
  let problem = WarehouseProblem::new(layout, config.allow_collisions);

  let mut ga = config.genetic_algorithm()?;
  ga.add_listener(|event: &GaEvent| {
    if let GaEvent::GenerationEnded {
      generation, best, ..
    } = event
    {
      if generation % 10 == 0 {
        println!("generation {generation:3}: {}", best.fitness());
      }
    }
  });
  let best = ga.run(&problem);

  println!("\nbest fitness {}", best.fitness());
  println!("{}", problem.routes(best.genome()));

  let paths = problem.paths(best.genome());
  println!("\n{} steps", paths.steps);
  for (idx, trace) in paths.forklifts.iter().enumerate() {
    let cells: Vec<String> = trace.iter().map(Cell::to_string).collect();
    println!("{idx}: {}", cells.join(" "));
  }
  Ok(())
}
