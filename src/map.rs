use itertools::Itertools;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, instrument, trace};

use crate::error::{Error, Result};
use crate::orbit::Orbit;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyId(usize);

#[derive(Debug)]
pub struct Body {
    name: String,
    parent: Option<BodyId>,
    children: Vec<BodyId>,
}

impl Body {
    fn new(name: &str) -> Self {
        Body {
            name: name.to_string(),
            parent: None,
            children: vec![],
        }
    }
}

/// Where two bodies' ancestry meets, and how many hops each is from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub common: BodyId,
    pub from: usize,
    pub to: usize,
}

impl Transfer {
    pub fn hops(&self) -> usize {
        self.from + self.to
    }
}

/// Every body named in an orbit map, keyed by name.
///
/// Bodies live in a flat arena and refer to one another by `BodyId`, so the
/// parent link is a plain index rather than an owning reference.
#[derive(Debug, Default)]
pub struct OrbitMap {
    bodies: Vec<Body>,
    names: HashMap<String, BodyId>,
}

impl OrbitMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading orbit map from {}", path.display());
        let file = File::open(path)?;
        Self::read(&mut BufReader::new(file))
    }

    pub fn read(input: &mut impl BufRead) -> Result<Self> {
        let mut map = OrbitMap::new();

        for (index, line) in input.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let orbit: Orbit = line.parse().map_err(|source| Error::MalformedRecord {
                line: index + 1,
                source,
            })?;
            trace!("Read orbit {}", orbit);

            let centre = map.get(&orbit.centre);
            let object = map.get(&orbit.object);
            map.establish(object, centre)?;
        }

        debug!("Loaded {} bodies", map.len());
        Ok(map)
    }

    /// Look up a body by name, adding it to the map if it hasn't been seen.
    pub fn get(&mut self, name: &str) -> BodyId {
        if let Some(id) = self.names.get(name) {
            return *id;
        }

        let id = BodyId(self.bodies.len());
        self.bodies.push(Body::new(name));
        self.names.insert(name.to_string(), id);
        id
    }

    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.names.get(name).cloned()
    }

    /// Record that `child` orbits `parent`.
    ///
    /// A body orbits at most one other, so any second assignment fails, even
    /// to the same parent. Assignments that would close a loop are refused
    /// too. The map is left untouched on failure.
    pub fn establish(&mut self, child: BodyId, parent: BodyId) -> Result<()> {
        if self.bodies[child.0].parent.is_some() {
            return Err(Error::MultipleParents {
                body: self.name(child).to_string(),
            });
        }

        if self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(Error::Cycle {
                body: self.name(child).to_string(),
                centre: self.name(parent).to_string(),
            });
        }

        self.bodies[parent.0].children.push(child);
        self.bodies[child.0].parent = Some(parent);
        Ok(())
    }

    pub fn name(&self, id: BodyId) -> &str {
        &self.bodies[id.0].name
    }

    pub fn parent(&self, id: BodyId) -> Option<BodyId> {
        self.bodies[id.0].parent
    }

    #[allow(dead_code)]
    pub fn children(&self, id: BodyId) -> &[BodyId] {
        &self.bodies[id.0].children
    }

    pub fn ids(&self) -> impl Iterator<Item = BodyId> {
        (0..self.bodies.len()).map(BodyId)
    }

    pub fn roots<'a>(&'a self) -> impl Iterator<Item = BodyId> + 'a {
        self.ids().filter(move |id| self.parent(*id).is_none())
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// `id` followed by each body it (indirectly) orbits, ending at a root.
    fn ancestors<'a>(&'a self, id: BodyId) -> impl Iterator<Item = BodyId> + 'a {
        let mut next = Some(id);
        std::iter::from_fn(move || {
            let current = next?;
            next = self.parent(current);
            Some(current)
        })
    }

    pub fn depth(&self, id: BodyId) -> usize {
        self.ancestors(id).count() - 1
    }

    /// The chain of bodies from the root of `id`'s tree down to `id` itself.
    pub fn path(&self, id: BodyId) -> Vec<BodyId> {
        let mut path: Vec<_> = self.ancestors(id).collect();
        path.reverse();
        path
    }

    pub fn describe_path(&self, id: BodyId) -> String {
        self.path(id).into_iter().map(|id| self.name(id)).join(")")
    }

    /// Find the nearest common ancestor of `a` and `b`.
    ///
    /// Both paths start at a root, so position `i` of either path is the
    /// ancestor at depth `i`. Returns `None` when the bodies are in different
    /// trees.
    #[instrument(level = "debug", skip(self))]
    pub fn distance_between(&self, a: BodyId, b: BodyId) -> Option<Transfer> {
        let a_path = self.path(a);
        let b_path = self.path(b);
        let shared = a_path.len().min(b_path.len());

        let index = a_path[..shared]
            .iter()
            .zip(&b_path[..shared])
            .rposition(|(x, y)| x == y)?;

        let transfer = Transfer {
            common: a_path[index],
            from: a_path.len() - (index + 1),
            to: b_path.len() - (index + 1),
        };
        debug!(
            "{} and {} meet at {}",
            self.name(a),
            self.name(b),
            self.name(transfer.common)
        );
        Some(transfer)
    }

    /// Total number of direct and indirect orbits.
    pub fn total_orbits(&self) -> usize {
        self.ids().map(|id| self.depth(id)).sum()
    }

    /// Number of orbital transfers needed to move from the body `from` orbits
    /// to the body `to` orbits.
    pub fn orbit_transfers(&self, from: &str, to: &str) -> Result<Option<usize>> {
        let from = self.centre_of(from)?;
        let to = self.centre_of(to)?;
        Ok(self.distance_between(from, to).map(|transfer| transfer.hops()))
    }

    fn centre_of(&self, name: &str) -> Result<BodyId> {
        let id = self.find(name).ok_or_else(|| Error::UnknownBody {
            body: name.to_string(),
        })?;
        self.parent(id).ok_or_else(|| Error::Unorbiting {
            body: name.to_string(),
        })
    }
}
