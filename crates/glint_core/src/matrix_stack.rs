//! Transform stack used while assembling a scene.

use glint_math::{DMat4, DVec3};

use crate::{SceneError, SceneResult};

/// A stack of local-to-world matrices.
///
/// The top of the stack is the transform given to shapes and lights as they
/// are added. The stack is never empty; its bottom entry is the identity.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    stack: Vec<DMat4>,
}

impl MatrixStack {
    /// Create a stack holding only the identity.
    pub fn new() -> Self {
        Self {
            stack: vec![DMat4::IDENTITY],
        }
    }

    /// Current transform.
    pub fn peek(&self) -> DMat4 {
        self.stack.last().copied().unwrap_or(DMat4::IDENTITY)
    }

    /// Duplicate the current transform.
    pub fn push(&mut self) {
        let top = self.peek();
        self.stack.push(top);
    }

    /// Restore the transform saved by the matching `push`.
    pub fn pop(&mut self) -> SceneResult<()> {
        if self.stack.len() <= 1 {
            return Err(SceneError::MatrixStackUnderflow);
        }
        self.stack.pop();
        Ok(())
    }

    /// Post-multiply the current transform: `top = top * m`.
    pub fn apply(&mut self, m: DMat4) {
        if let Some(top) = self.stack.last_mut() {
            *top = *top * m;
        }
    }

    /// Reset the current transform to the identity.
    pub fn load_identity(&mut self) {
        if let Some(top) = self.stack.last_mut() {
            *top = DMat4::IDENTITY;
        }
    }

    pub fn translate(&mut self, offset: DVec3) {
        self.apply(DMat4::from_translation(offset));
    }

    /// Rotate about `axis` by an angle in degrees.
    pub fn rotate(&mut self, axis: DVec3, degrees: f64) {
        self.apply(DMat4::from_axis_angle(axis.normalize(), degrees.to_radians()));
    }

    pub fn scale(&mut self, factors: DVec3) {
        self.apply(DMat4::from_scale(factors));
    }

    /// Number of saved entries above the bottom identity.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}
