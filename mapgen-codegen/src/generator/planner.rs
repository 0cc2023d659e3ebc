//! File planning.

use std::{collections::HashMap, path::PathBuf};

use indexmap::IndexMap;
use mapgen_ir::{ClassId, FileId};
use mapgen_source::MapperPlacement;
use serde::Serialize;
use tracing::debug;

use super::Naming;
use crate::{
    GenerateError,
    analysis::{TypeResolver, reachable_classes},
    model::{FileFactory, FileRole, OutputId},
};

/// Output files allocated for one origin file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedOutput {
    pub origin: FileId,
    /// Receives the generated declarations.
    pub entity: OutputId,
    /// Receives the mapper functions; equal to `entity` for inline placement.
    pub mapper: OutputId,
}

/// Origin file to output file mapping, in allocation order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationPlan {
    outputs: IndexMap<FileId, PlannedOutput>,
}

impl GenerationPlan {
    pub fn get(&self, origin: FileId) -> Option<&PlannedOutput> {
        self.outputs.get(&origin)
    }

    pub fn entity_file(&self, origin: FileId) -> Option<OutputId> {
        self.get(origin).map(|output| output.entity)
    }

    /// Mapper file paired with an entity file.
    pub fn mapper_file(&self, entity: OutputId) -> Option<OutputId> {
        self.outputs
            .values()
            .find(|output| output.entity == entity)
            .map(|output| output.mapper)
    }

    pub fn outputs(&self) -> impl Iterator<Item = &PlannedOutput> {
        self.outputs.values()
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

/// Allocates output files for every origin file holding a reachable class.
///
/// All outputs live next to the selected class's file and use its package.
/// The root's file is named after the root's counterpart; every other file
/// after the first class discovered in it.
pub struct Planner<'a, R> {
    resolver: &'a R,
    naming: &'a Naming,
    placement: MapperPlacement,
    overwrite: bool,
}

impl<'a, R: TypeResolver> Planner<'a, R> {
    pub fn new(resolver: &'a R, naming: &'a Naming) -> Self {
        Self {
            resolver,
            naming,
            placement: MapperPlacement::Inline,
            overwrite: false,
        }
    }

    pub fn placement(mut self, placement: MapperPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Allow planned files that already exist on disk.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Build the plan, creating (or reusing) output files in `factory`.
    ///
    /// Fails without touching the disk when a planned file already exists
    /// (unless overwriting) or when two origin files claim the same output.
    pub fn plan(&self, factory: &mut impl FileFactory) -> Result<GenerationPlan, GenerateError> {
        let mut plan = GenerationPlan::default();
        let mut claimed = HashMap::new();
        for class in reachable_classes(self.resolver, self.naming.root) {
            self.allocate(class, &mut plan, &mut claimed, factory)?;
        }
        debug!(files = plan.len(), "planned output files");
        Ok(plan)
    }

    fn allocate(
        &self,
        class: ClassId,
        plan: &mut GenerationPlan,
        claimed: &mut HashMap<PathBuf, FileId>,
        factory: &mut impl FileFactory,
    ) -> Result<(), GenerateError> {
        let project = self.resolver.project();
        let origin = project.class(class).file;
        if plan.outputs.contains_key(&origin) {
            return Ok(());
        }

        let root_file = project.file(project.class(self.naming.root).file);
        let stem = self.naming.class_name(project, class);

        let entity_path = root_file.dir().join(format!("{stem}.kt"));
        let entity = self.claim(entity_path, origin, FileRole::Entity, claimed, factory)?;
        let mapper = match self.placement {
            MapperPlacement::Inline => entity,
            MapperPlacement::Separate => {
                let mapper_path = root_file.dir().join(format!("{stem}Mapper.kt"));
                self.claim(mapper_path, origin, FileRole::Mapper, claimed, factory)?
            }
        };

        debug!(
            origin = %project.file(origin).path.display(),
            output = %stem,
            "allocated output file"
        );
        plan.outputs.insert(
            origin,
            PlannedOutput {
                origin,
                entity,
                mapper,
            },
        );
        Ok(())
    }

    fn claim(
        &self,
        path: PathBuf,
        origin: FileId,
        role: FileRole,
        claimed: &mut HashMap<PathBuf, FileId>,
        factory: &mut impl FileFactory,
    ) -> Result<OutputId, GenerateError> {
        let project = self.resolver.project();
        if let Some(first) = claimed.get(&path) {
            return Err(GenerateError::PathConflict {
                path,
                first: project.file(*first).path.clone(),
                second: project.file(origin).path.clone(),
            });
        }
        if !self.overwrite && path.exists() {
            return Err(GenerateError::FileExists { path });
        }
        claimed.insert(path.clone(), origin);

        let package = &project.file(project.class(self.naming.root).file).package;
        Ok(match factory.find_file(&path) {
            Some(id) => id,
            None => factory.create_file(path, package, role),
        })
    }
}
