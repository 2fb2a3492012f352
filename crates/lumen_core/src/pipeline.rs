use flecs_ecs::prelude::*;

// Runs after OnStore, once all CPU-side state for the frame is final.
#[derive(Component)]
pub struct PhaseRender3D;

#[derive(Component)]
pub struct PhasePresent;

pub fn define_pipeline_stages(world: &World) {
    world
        .component::<PhaseRender3D>()
        .add(flecs::Phase)
        .depends_on(flecs::pipeline::OnStore);
    world
        .component::<PhasePresent>()
        .add(flecs::Phase)
        .depends_on(PhaseRender3D);
}
