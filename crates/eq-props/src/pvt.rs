//! PVT region lookup.

use crate::density::DensityModel;
use crate::error::{PropsError, PropsResult};

/// One density model per PVT region plus the cell -> PVT region map.
#[derive(Debug)]
pub struct PvtRegions {
    models: Vec<Box<dyn DensityModel>>,
    pvtnum: Option<Vec<usize>>,
}

impl PvtRegions {
    /// Single PVT region covering every cell.
    pub fn single(model: Box<dyn DensityModel>) -> Self {
        Self {
            models: vec![model],
            pvtnum: None,
        }
    }

    /// Several PVT regions; cells default to region 0 until `with_pvtnum` is called.
    pub fn new(models: Vec<Box<dyn DensityModel>>) -> PropsResult<Self> {
        if models.is_empty() {
            return Err(PropsError::InvalidArg {
                what: "at least one PVT region is required".to_string(),
            });
        }
        Ok(Self {
            models,
            pvtnum: None,
        })
    }

    /// Attach an explicit cell -> PVT region array.
    pub fn with_pvtnum(mut self, pvtnum: Vec<usize>) -> PropsResult<Self> {
        if let Some(&bad) = pvtnum.iter().find(|&&r| r >= self.models.len()) {
            return Err(PropsError::RegionOutOfRange {
                what: "PVT",
                region: bad,
                count: self.models.len(),
            });
        }
        self.pvtnum = Some(pvtnum);
        Ok(self)
    }

    pub fn num_regions(&self) -> usize {
        self.models.len()
    }

    /// PVT region of a cell.
    pub fn region_of(&self, cell: usize) -> PropsResult<usize> {
        match &self.pvtnum {
            None => Ok(0),
            Some(pvtnum) => pvtnum.get(cell).copied().ok_or(PropsError::InvalidArg {
                what: format!("cell {} has no PVT region", cell),
            }),
        }
    }

    /// Density model that applies to `cell`.
    pub fn model_for_cell(&self, cell: usize) -> PropsResult<&dyn DensityModel> {
        let region = self.region_of(cell)?;
        Ok(self.models[region].as_ref())
    }
}
