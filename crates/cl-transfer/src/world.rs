use cl_inventory::{ContainerAccess, ItemSpill};
use cl_mobility::Locomotion;
use cl_spatial::{SpatialIndex, WorkplaceDirectory};

/// Everything a [`TransferTask`](crate::TransferTask) touches.
pub trait TransferWorld:
    Locomotion + ContainerAccess + ItemSpill + SpatialIndex + WorkplaceDirectory
{
}

impl<T> TransferWorld for T where
    T: Locomotion + ContainerAccess + ItemSpill + SpatialIndex + WorkplaceDirectory + ?Sized
{
}
