//! WGSL shader module compilation with error reporting.
//!
//! Module creation runs inside a validation error scope, so a broken shader
//! comes back as [`ShaderError::CompilationFailed`] instead of reaching the
//! device's uncaptured-error handler.

use log::{debug, error, info};
use thiserror::Error;
use wgpu::{ShaderModuleDescriptor, ShaderSource};

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("shader '{name}' failed to compile: {message}")]
    CompilationFailed { name: String, message: String },
}

/// Compile WGSL `source` into a module labelled `name`.
///
/// Errors are logged with their diagnostic text and returned; the invalid
/// module is dropped.
pub fn compile_shader(
    device: &wgpu::Device,
    name: &str,
    source: &str,
) -> Result<wgpu::ShaderModule, ShaderError> {
    debug!("Compiling shader '{}'", name);

    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(ShaderModuleDescriptor {
        label: Some(name),
        source: ShaderSource::Wgsl(source.into()),
    });
    let validation = pollster::block_on(scope.pop());

    let info = pollster::block_on(module.get_compilation_info());
    let failure = error_text(&info.messages).or_else(|| validation.map(|e| e.to_string()));
    if let Some(message) = failure {
        error!("Shader '{}' failed to compile: {}", name, message);
        return Err(ShaderError::CompilationFailed {
            name: name.to_string(),
            message,
        });
    }

    info!("Compiled shader '{}'", name);
    Ok(module)
}

/// Join the error-level messages, with line numbers where known.
fn error_text(messages: &[wgpu::CompilationMessage]) -> Option<String> {
    let errors: Vec<String> = messages
        .iter()
        .filter(|m| m.message_type == wgpu::CompilationMessageType::Error)
        .map(|m| match &m.location {
            Some(location) => format!("line {}: {}", location.line_number, m.message),
            None => m.message.clone(),
        })
        .collect();
    (!errors.is_empty()).then(|| errors.join("; "))
}
