// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Step catalog: the per-kind step definitions and the sizing rule that
//! decides how many of each kind a product needs.

use crate::config::consts::{
    MAX_MULTICAST_GROUPS, MULTICAST_PORT, MULTICAST_PREFIX, WORKERS_PER_CALIBRATOR,
    WORKERS_PER_INGEST,
};
use crate::config::{ComponentConfig, Config};
use crate::errors::ConfigError;
use crate::observability::messages::catalog::{CatalogSized, MulticastExhausted};
use crate::observability::messages::StructuredLog;
use crate::workflow::{Step, StepKind};

const TELSTATE_STEP: &str = "telstate";
const HEAD_STEP: &str = "head";
const BATCH_SETUP_STEP: &str = "batch-setup";

const TELSTATE_IP_PARAMETER: &str = "tasks-telstate-ip";
const TELSTATE_IP_VALUE: &str = "{{tasks.telstate.ip}}";
const MULTICAST_PARAMETER: &str = "mcast-addr";

/// Instance-specific inputs to [`catalog_for`].
#[derive(Debug, Clone, Default)]
pub struct StepParams {
    /// 1-based instance number for kinds that repeat
    pub index: u32,
    /// 1-based multicast group for realtime daemons
    pub multicast_group: u32,
    /// Dependencies on top of the kind's fixed ones
    pub dependencies: Vec<String>,
}

/// How many steps of each repeated kind a worker count produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sizing {
    pub ingest: u32,
    pub calibrator: u32,
    pub batch: u32,
}

impl Sizing {
    /// Integer division, no rounding up.
    pub fn for_workers(worker_count: u32) -> Self {
        Self {
            ingest: worker_count / WORKERS_PER_INGEST,
            calibrator: worker_count / WORKERS_PER_CALIBRATOR,
            batch: worker_count,
        }
    }

    /// Number of realtime daemons, each of which needs its own multicast group.
    pub fn realtime(&self) -> u32 {
        self.ingest + self.calibrator
    }
}

/// Multicast address for a 1-based group number.
pub fn multicast_address(group: u32) -> String {
    format!("{}.{}:{}", MULTICAST_PREFIX, group, MULTICAST_PORT)
}

/// Build one step of `kind` from its component config.
///
/// Pure function of its inputs; all per-kind behavior lives in this table.
pub fn catalog_for(kind: StepKind, component: &ComponentConfig, params: &StepParams) -> Step {
    let name = match kind {
        StepKind::Telstate => TELSTATE_STEP.to_string(),
        StepKind::Ingest => format!("ingest{}", params.index),
        StepKind::Calibrator => format!("calibrator{}", params.index),
        StepKind::Head => HEAD_STEP.to_string(),
        StepKind::BatchSetup => BATCH_SETUP_STEP.to_string(),
        StepKind::Batch => format!("batch{}", params.index),
    };

    let mut step = Step::new(name, kind, component.docker_image.clone());
    step.resources = component.resources.clone();

    match kind {
        StepKind::Telstate => {
            step.daemon = true;
        }
        StepKind::Ingest | StepKind::Calibrator => {
            step.depends_on(TELSTATE_STEP);
            step.command = vec!["python".to_string()];
            step.push_positional("./run.sh");
            step.push_positional("-u");
            step.push_input(TELSTATE_IP_PARAMETER, TELSTATE_IP_VALUE);
            step.push_input(MULTICAST_PARAMETER, multicast_address(params.multicast_group));
            step.daemon = true;
            step.host_network = true;
        }
        StepKind::Head => {
            step.command = vec!["python".to_string()];
            step.push_positional("./run.sh");
            step.push_positional("-u");
        }
        StepKind::BatchSetup => {
            step.depends_on(TELSTATE_STEP);
            step.command = vec!["python".to_string()];
            step.push_positional("./run.sh");
            step.push_positional("-u");
            step.push_input(TELSTATE_IP_PARAMETER, TELSTATE_IP_VALUE);
        }
        StepKind::Batch => {
            step.depends_on(BATCH_SETUP_STEP);
            step.command = vec!["python".to_string()];
            step.push_positional("./run.sh");
            step.when_guard = Some(format!(
                "{{{{tasks.{}.outputs.result}}}} >= {}",
                BATCH_SETUP_STEP, params.index
            ));
        }
    }

    for dependency in &params.dependencies {
        step.depends_on(dependency.clone());
    }

    // Positional values run literally, ahead of the declared inputs
    step.container_args = step
        .parameters
        .iter()
        .filter(|p| !p.is_input)
        .map(|p| p.value.clone())
        .chain(
            step.inputs()
                .map(|p| format!("{{{{inputs.parameters.{}}}}}", p.name)),
        )
        .collect();

    step
}

/// Produces the concrete step list for one product.
pub struct StepCatalog<'a> {
    config: &'a Config,
}

impl<'a> StepCatalog<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Steps for `worker_count` workers, in graph order: telstate, ingest,
    /// calibrator, head, then the batch stage when enabled.
    pub fn steps(&self, worker_count: u32) -> Result<Vec<Step>, ConfigError> {
        let sizing = Sizing::for_workers(worker_count);
        if sizing.realtime() > MAX_MULTICAST_GROUPS {
            MulticastExhausted {
                worker_count,
                required: sizing.realtime(),
                available: MAX_MULTICAST_GROUPS,
            }
            .log();
            return Err(ConfigError::MulticastExhausted {
                worker_count,
                required: sizing.realtime(),
                available: MAX_MULTICAST_GROUPS,
            });
        }

        CatalogSized {
            worker_count,
            ingest: sizing.ingest,
            calibrator: sizing.calibrator,
            batch_stage: self.config.batch_stage,
        }
        .log();

        let mut steps = vec![self.step(StepKind::Telstate, StepParams::default())?];

        let mut group = 0;
        let mut realtime_names = Vec::with_capacity(sizing.realtime() as usize);
        for (kind, count) in [
            (StepKind::Ingest, sizing.ingest),
            (StepKind::Calibrator, sizing.calibrator),
        ] {
            for index in 1..=count {
                group += 1;
                let step = self.step(
                    kind,
                    StepParams {
                        index,
                        multicast_group: group,
                        ..Default::default()
                    },
                )?;
                realtime_names.push(step.name.clone());
                steps.push(step);
            }
        }

        steps.push(self.step(
            StepKind::Head,
            StepParams {
                dependencies: realtime_names,
                ..Default::default()
            },
        )?);

        if self.config.batch_stage {
            steps.push(self.step(StepKind::BatchSetup, StepParams::default())?);
            for index in 1..=sizing.batch {
                steps.push(self.step(
                    StepKind::Batch,
                    StepParams {
                        index,
                        ..Default::default()
                    },
                )?);
            }
        }

        Ok(steps)
    }

    fn step(&self, kind: StepKind, params: StepParams) -> Result<Step, ConfigError> {
        let component = self.config.component(kind.component())?;
        Ok(catalog_for(kind, component, &params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const CONFIG: &str = r#"
engine:
  url: http://localhost:2746
products:
  array1:
    namespace: array1
components:
  telstate:
    docker_image: redis:latest
  ingest:
    docker_image: pocingest:0.5
  calibrator:
    docker_image: poccalibrator:0.1
    resources:
      limits:
        cpu: 500m
  head:
    docker_image: pochead:0.1
  batch_setup:
    docker_image: pocbatch_setup:0.4
  batch:
    docker_image: pocbatch:0.1
"#;

    fn config() -> Config {
        Config::from_yaml(CONFIG).unwrap()
    }

    fn count_kind(steps: &[Step], kind: StepKind) -> usize {
        steps.iter().filter(|s| s.kind == kind).count()
    }

    #[test]
    fn sizing_uses_integer_division() {
        for workers in 0..=60 {
            let sizing = Sizing::for_workers(workers);
            assert_eq!(sizing.ingest, workers / 5, "workers={}", workers);
            assert_eq!(sizing.calibrator, workers / 4, "workers={}", workers);
        }
    }

    #[test]
    fn step_counts_follow_sizing() {
        let cfg = config();
        let catalog = StepCatalog::new(&cfg);

        for workers in [0, 3, 4, 5, 10, 19, 20, 41] {
            let steps = catalog.steps(workers).unwrap();
            let sizing = Sizing::for_workers(workers);

            assert_eq!(count_kind(&steps, StepKind::Telstate), 1);
            assert_eq!(count_kind(&steps, StepKind::Head), 1);
            assert_eq!(count_kind(&steps, StepKind::Ingest), sizing.ingest as usize);
            assert_eq!(count_kind(&steps, StepKind::Calibrator), sizing.calibrator as usize);
            assert_eq!(steps.len() - 2, (sizing.ingest + sizing.calibrator) as usize);
        }
    }

    #[test]
    fn zero_workers_gives_unconnected_head() {
        let cfg = config();
        let steps = StepCatalog::new(&cfg).steps(0).unwrap();

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].name, "telstate");
        assert_eq!(steps[1].name, "head");
        assert!(steps[1].dependencies.is_empty());
    }

    #[test]
    fn head_fans_in_on_every_realtime_step() {
        let cfg = config();
        let steps = StepCatalog::new(&cfg).steps(10).unwrap();
        let head = steps.iter().find(|s| s.kind == StepKind::Head).unwrap();

        assert_eq!(
            head.dependencies,
            vec!["ingest1", "ingest2", "calibrator1", "calibrator2"]
        );
        assert_eq!(steps.last().unwrap().name, "head");
    }

    #[test]
    fn multicast_addresses_are_distinct() {
        let cfg = config();
        let steps = StepCatalog::new(&cfg).steps(10).unwrap();

        let addresses: Vec<&str> = steps
            .iter()
            .filter_map(|s| s.parameter("mcast-addr"))
            .collect();
        let unique: HashSet<&str> = addresses.iter().copied().collect();

        assert_eq!(addresses.len(), 4);
        assert_eq!(unique.len(), 4);
        assert_eq!(
            addresses,
            vec![
                "239.23.9.1:6789",
                "239.23.9.2:6789",
                "239.23.9.3:6789",
                "239.23.9.4:6789"
            ]
        );
    }

    #[test]
    fn realtime_steps_are_host_network_daemons_on_telstate() {
        let cfg = config();
        let steps = StepCatalog::new(&cfg).steps(5).unwrap();

        for step in steps
            .iter()
            .filter(|s| matches!(s.kind, StepKind::Ingest | StepKind::Calibrator))
        {
            assert!(step.daemon);
            assert!(step.host_network);
            assert_eq!(step.dependencies, vec!["telstate"]);
            assert_eq!(step.parameter("tasks-telstate-ip"), Some("{{tasks.telstate.ip}}"));
            assert_eq!(
                step.container_args,
                vec![
                    "./run.sh",
                    "-u",
                    "{{inputs.parameters.tasks-telstate-ip}}",
                    "{{inputs.parameters.mcast-addr}}"
                ]
            );
        }

        let telstate = &steps[0];
        assert!(telstate.container_args.is_empty());
        assert!(telstate.daemon);
        assert!(telstate.dependencies.is_empty());
        assert!(telstate.when_guard.is_none());
    }

    #[test]
    fn component_image_and_resources_are_used() {
        let cfg = config();
        let steps = StepCatalog::new(&cfg).steps(4).unwrap();
        let calibrator = steps.iter().find(|s| s.name == "calibrator1").unwrap();

        assert_eq!(calibrator.image, "poccalibrator:0.1");
        assert_eq!(
            calibrator.resources.as_ref().unwrap().limits["cpu"],
            "500m"
        );
    }

    #[test]
    fn batch_stage_adds_guarded_workers() {
        let mut cfg = config();
        cfg.batch_stage = true;
        let steps = StepCatalog::new(&cfg).steps(3).unwrap();

        let names: Vec<&str> = steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["telstate", "head", "batch-setup", "batch1", "batch2", "batch3"]
        );

        let batch2 = &steps[4];
        assert_eq!(batch2.dependencies, vec!["batch-setup"]);
        assert_eq!(
            batch2.when_guard.as_deref(),
            Some("{{tasks.batch-setup.outputs.result}} >= 2")
        );
        assert_eq!(batch2.parameter("batch2-0"), Some("./run.sh"));
        assert_eq!(batch2.command, vec!["python"]);
        assert_eq!(batch2.container_args, vec!["./run.sh"]);

        let setup = &steps[2];
        assert_eq!(
            setup.container_args,
            vec!["./run.sh", "-u", "{{inputs.parameters.tasks-telstate-ip}}"]
        );
    }

    #[test]
    fn head_runs_the_entry_script() {
        let cfg = config();
        for workers in [0, 5] {
            let steps = StepCatalog::new(&cfg).steps(workers).unwrap();
            let head = steps.iter().find(|s| s.kind == StepKind::Head).unwrap();

            assert_eq!(head.command, vec!["python"]);
            assert_eq!(head.container_args, vec!["./run.sh", "-u"]);
        }
    }

    #[test]
    fn missing_component_fails() {
        let mut cfg = config();
        cfg.components.remove("calibrator");

        // Below four workers no calibrator is needed.
        assert!(StepCatalog::new(&cfg).steps(3).is_ok());

        let err = StepCatalog::new(&cfg).steps(4).unwrap_err();
        assert!(
            matches!(err, ConfigError::MissingComponent { ref component } if component == "calibrator")
        );
    }

    #[test]
    fn too_many_realtime_steps_is_rejected() {
        let cfg = config();
        // 600/5 + 600/4 = 270 groups
        let err = StepCatalog::new(&cfg).steps(600).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MulticastExhausted { required: 270, available: 254, .. }
        ));

        // 560/5 + 560/4 = 252 groups
        assert!(StepCatalog::new(&cfg).steps(560).is_ok());
    }
}
