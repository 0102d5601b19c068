/// WGSL shader for the skybox cube.
///
/// The vertex stage writes `xyww` so every fragment lands on the far plane;
/// the cube position doubles as the cubemap sampling direction.
pub const SKYBOX_SHADER: &str = r#"
struct CameraUniforms {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: CameraUniforms;

@group(1) @binding(0)
var skybox_texture: texture_cube<f32>;
@group(1) @binding(1)
var skybox_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) direction: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let clip = camera.projection * camera.view * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = clip.xyww;
    out.direction = vertex.position;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(skybox_texture, skybox_sampler, in.direction);
}
"#;
