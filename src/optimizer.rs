//! The genetic algorithm driver.

use rand::rngs::StdRng;
use tracing::{debug, info};
use typed_builder::TypedBuilder;

use crate::{
  execution::Execution,
  individual::{Fitness, Individual, Problem},
  mutation::Mutation,
  population::Population,
  recombination::Recombination,
  selection::Selection,
  termination::{GenerationTerminator, StopHandle},
};

/// A notification fired by [`GeneticAlgorithm::run`].
#[derive(Clone, Debug, PartialEq)]
pub enum GaEvent {
  /// A generation was evaluated. Generation `0` is the initial population.
  GenerationEnded {
    /// Index of the generation.
    generation: usize,
    /// Best individual found so far in the run.
    best: Individual,
    /// Best individual of this generation.
    generation_best: Individual,
    /// Mean fitness of this generation.
    average_fitness: Fitness,
  },
  /// The run is over.
  RunEnded {
    /// Best individual of the whole run.
    best: Individual,
    /// Mean fitness of the last generation.
    average_fitness: Fitness,
  },
}

/// Observes a run of the genetic algorithm.
///
/// Implemented for any `FnMut(&GaEvent)` closure.
pub trait Listener {
  /// Receives an event.
  fn notify(&mut self, event: &GaEvent);
}

impl<F> Listener for F
where
  F: FnMut(&GaEvent),
{
  fn notify(&mut self, event: &GaEvent) {
    self(event)
  }
}

/// A single-objective generational genetic algorithm over permutations.
///
/// Every generation is selected, recombined, mutated and evaluated in that
/// order. The best individual of the run is tracked across generations, so
/// it is never lost even without elitism.
///
/// # Examples
/// ```
/// use forklift_ga::{
///   GenerationTerminator,
///   GeneticAlgorithm,
///   Mutation,
///   MutationMethod,
///   Recombination,
///   RecombinationMethod,
///   Selection,
/// };
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut ga = GeneticAlgorithm::builder()
///   .rng(StdRng::seed_from_u64(0))
///   .population_size(50)
///   .terminator(GenerationTerminator(20))
///   .selection(Selection::Tournament(2))
///   .recombination(Recombination::new(RecombinationMethod::Ox1, 0.8).unwrap())
///   .mutation(Mutation::new(MutationMethod::Rsm, 0.1).unwrap())
///   .build();
/// # let _ = &mut ga;
/// ```
#[derive(TypedBuilder)]
pub struct GeneticAlgorithm {
  /// Random stream shared by every operator of the run.
  rng: StdRng,
  #[builder(setter(
    transform = |size: usize| {
      if size == 0 {
        panic!("population size is zero")
      }
      size
    },
    doc = "
The population size setter.

# Panics

Panics if `size` is zero.",
  ))]
  population_size: usize,
  terminator: GenerationTerminator,
  selection: Selection,
  recombination: Recombination,
  mutation: Mutation,
  #[builder(default)]
  execution: Execution,
  #[builder(setter(skip), default)]
  stop: StopHandle,
  #[builder(setter(skip), default)]
  listeners: Vec<Box<dyn Listener + Send>>,
  #[builder(setter(skip), default)]
  generation: usize,
}

impl GeneticAlgorithm {
  /// Registers a listener. Listeners are notified in registration order.
  pub fn add_listener(&mut self, listener: impl Listener + Send + 'static) {
    self.listeners.push(Box::new(listener));
  }

  /// Returns a handle that stops [`GeneticAlgorithm::run`] between two
  /// generations.
  pub fn stop_handle(&self) -> StopHandle {
    self.stop.clone()
  }

  /// Returns the number of generations of the current or last run, the
  /// initial population excluded.
  pub fn generation(&self) -> usize {
    self.generation
  }

  /// Runs the algorithm until the generation budget is spent or the stop
  /// handle is raised, then returns the best individual found.
  pub fn run<P: Problem>(&mut self, problem: &P) -> Individual {
    info!(
      population_size = self.population_size,
      max_generations = self.terminator.0,
      selection = %self.selection,
      recombination = %self.recombination,
      mutation = %self.mutation,
      "starting genetic algorithm"
    );
    self.generation = 0;

    let mut population =
      Population::generate(self.population_size, problem, &mut self.rng);
    let mut best = population.evaluate(problem, self.execution).clone();
    self.emit(&GaEvent::GenerationEnded {
      generation: 0,
      best: best.clone(),
      generation_best: best.clone(),
      average_fitness: population.average_fitness(),
    });

    while !self.terminate() {
      let mut next = self.selection.run(&population, &mut self.rng);
      self.recombination.run(&mut next, &mut self.rng);
      self.mutation.run(&mut next, &mut self.rng);
      let generation_best = next.evaluate(problem, self.execution).clone();
      if generation_best.better_than(&best) {
        best = generation_best.clone();
      }
      population = next;
      self.generation += 1;

      debug!(
        generation = self.generation,
        best = best.fitness(),
        generation_best = generation_best.fitness(),
        average = population.average_fitness(),
        "generation ended"
      );
      self.emit(&GaEvent::GenerationEnded {
        generation: self.generation,
        best: best.clone(),
        generation_best,
        average_fitness: population.average_fitness(),
      });
    }

    info!(
      generations = self.generation,
      best = best.fitness(),
      stopped = self.stop.is_stopped(),
      "genetic algorithm finished"
    );
    self.emit(&GaEvent::RunEnded {
      best: best.clone(),
      average_fitness: population.average_fitness(),
    });
    best
  }

  fn terminate(&self) -> bool {
    self.terminator.terminate(self.generation) || self.stop.is_stopped()
  }

  fn emit(&mut self, event: &GaEvent) {
    for listener in &mut self.listeners {
      listener.notify(event);
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{Arc, Mutex};

  use rand::SeedableRng;

  use super::*;
  use crate::{
    individual::Gene,
    mutation::MutationMethod,
    recombination::RecombinationMethod,
  };

  /// Fitness is the number of genes out of place.
  struct Sorting(usize);

  impl Problem for Sorting {
    fn num_genes(&self) -> usize {
      self.0
    }

    fn fitness(&self, genome: &[Gene]) -> Fitness {
      genome.iter().enumerate().filter(|(i, g)| i != *g).count() as Fitness
    }
  }

  fn algorithm(seed: u64, generations: usize) -> GeneticAlgorithm {
    GeneticAlgorithm::builder()
      .rng(StdRng::seed_from_u64(seed))
      .population_size(30)
      .terminator(GenerationTerminator(generations))
      .selection(Selection::Tournament(3))
      .recombination(
        Recombination::new(RecombinationMethod::Pmx, 0.9).unwrap(),
      )
      .mutation(Mutation::new(MutationMethod::Psm, 0.05).unwrap())
      .build()
  }

  fn record(ga: &mut GeneticAlgorithm) -> Arc<Mutex<Vec<GaEvent>>> {
    let events = Arc::new(Mutex::new(vec![]));
    let sink = Arc::clone(&events);
    ga.add_listener(move |event: &GaEvent| {
      sink.lock().unwrap().push(event.clone())
    });
    events
  }

  #[test]
  fn test_fires_one_event_per_generation() {
    let mut ga = algorithm(1, 10);
    let events = record(&mut ga);
    ga.run(&Sorting(8));

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 12);
    for (idx, event) in events[..11].iter().enumerate() {
      match event {
        GaEvent::GenerationEnded { generation, .. } => {
          assert_eq!(*generation, idx)
        }
        other => panic!("unexpected event {other:?}"),
      }
    }
    assert!(matches!(events[11], GaEvent::RunEnded { .. }));
    assert_eq!(ga.generation(), 10);
  }

  #[test]
  fn test_best_never_gets_worse() {
    let mut ga = algorithm(2, 40);
    let events = record(&mut ga);
    let best = ga.run(&Sorting(10));

    let events = events.lock().unwrap();
    let mut previous = Fitness::INFINITY;
    for event in events.iter() {
      if let GaEvent::GenerationEnded {
        best,
        generation_best,
        ..
      } = event
      {
        assert!(best.fitness() <= previous);
        assert!(best.fitness() <= generation_best.fitness());
        previous = best.fitness();
      }
    }
    assert_eq!(best.fitness(), previous);
    assert_eq!(best.fitness(), Sorting(10).fitness(best.genome()));
  }

  #[test]
  fn test_same_seed_same_run() {
    let first = algorithm(7, 15).run(&Sorting(9));
    let second = algorithm(7, 15).run(&Sorting(9));
    assert_eq!(first, second);
  }

  #[test]
  fn test_parallel_matches_sequential() {
    let sequential = algorithm(11, 15).run(&Sorting(9));
    let mut parallel = algorithm(11, 15);
    parallel.execution = Execution::Parallel;
    assert_eq!(parallel.run(&Sorting(9)), sequential);
  }

  #[test]
  fn test_stop_handle_ends_run_between_generations() {
    let mut ga = algorithm(3, 1000);
    let handle = ga.stop_handle();
    ga.add_listener(move |event: &GaEvent| {
      if let GaEvent::GenerationEnded { generation: 2, .. } = event {
        handle.stop();
      }
    });
    let events = record(&mut ga);
    ga.run(&Sorting(6));

    assert_eq!(ga.generation(), 2);
    assert_eq!(events.lock().unwrap().len(), 4);
  }

  #[test]
  fn test_zero_generations_evaluates_initial_population() {
    let mut ga = algorithm(4, 0);
    let best = ga.run(&Sorting(5));
    assert!(best.fitness().is_finite());
    assert_eq!(ga.generation(), 0);
  }

  #[test]
  #[should_panic(expected = "population size is zero")]
  fn test_zero_population_panics() {
    let _ = GeneticAlgorithm::builder()
      .rng(StdRng::seed_from_u64(0))
      .population_size(0);
  }
}
