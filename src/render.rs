use crate::error::Result;
use crate::planet::palette::Rgb;
use crate::planet::Mesh;
use nalgebra::Matrix4;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

/// Whatever ends up drawing meshes. Meshes are uploaded once and drawn every frame with the
/// transforms of their owner.
pub trait RenderTarget {
    type Mesh;

    fn upload(&mut self, mesh: &Mesh) -> Result<Self::Mesh>;

    fn update_colors(&mut self, handle: &Self::Mesh, colors: &[Rgb]) -> Result<()>;

    fn draw(&mut self, handle: &Self::Mesh, model_view_projection: &Matrix4<f32>, model: &Matrix4<f32>);
}

/// Resources shared by key. A resource lives as long as the cache or any outstanding handle
/// holds it.
pub struct ResourceCache<K, V> {
    entries: HashMap<K, Rc<V>>,
}

impl<K: Eq + Hash, V> ResourceCache<K, V> {
    pub fn new() -> ResourceCache<K, V> {
        ResourceCache {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &K) -> Option<Rc<V>> {
        self.entries.get(key).cloned()
    }

    pub fn get_or_try_insert_with<F>(&mut self, key: K, create: F) -> Result<Rc<V>>
    where
        F: FnOnce() -> Result<V>,
    {
        if let Some(value) = self.entries.get(&key) {
            return Ok(Rc::clone(value));
        }
        let value = Rc::new(create()?);
        self.entries.insert(key, Rc::clone(&value));
        Ok(value)
    }

    pub fn release(&mut self, key: &K) -> Option<Rc<V>> {
        self.entries.remove(key)
    }

    /// Drops every resource nobody outside the cache holds on to. Returns how many were dropped.
    pub fn release_unused(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, value| Rc::strong_count(value) > 1);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash, V> Default for ResourceCache<K, V> {
    fn default() -> Self {
        ResourceCache::new()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessMesh {
    pub id: usize,
    pub vertices: usize,
    pub triangles: usize,
    pub buffer_len: usize,
}

/// Counts what it is asked to do instead of drawing.
#[derive(Default, Debug)]
pub struct HeadlessTarget {
    pub uploads: usize,
    pub color_updates: usize,
    pub draws: usize,
    pub vertices_uploaded: usize,
    pub triangles_drawn: usize,
}

impl RenderTarget for HeadlessTarget {
    type Mesh = HeadlessMesh;

    fn upload(&mut self, mesh: &Mesh) -> Result<HeadlessMesh> {
        let handle = HeadlessMesh {
            id: self.uploads,
            vertices: mesh.vertex_count(),
            triangles: mesh.indices().len() / 3,
            buffer_len: mesh.interleaved().len(),
        };
        self.uploads += 1;
        self.vertices_uploaded += handle.vertices;
        Ok(handle)
    }

    fn update_colors(&mut self, _handle: &HeadlessMesh, _colors: &[Rgb]) -> Result<()> {
        self.color_updates += 1;
        Ok(())
    }

    fn draw(&mut self, handle: &HeadlessMesh, _model_view_projection: &Matrix4<f32>, _model: &Matrix4<f32>) {
        self.draws += 1;
        self.triangles_drawn += handle.triangles;
    }
}
