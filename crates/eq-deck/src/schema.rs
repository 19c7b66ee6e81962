//! Case schema definitions.
//!
//! All quantities are SI: metres, pascals, kg/m³, 1/Pa. Depth increases
//! downward.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub phases: PhasesDef,
    pub grid: GridDef,
    pub equil: Vec<EquilDef>,
    /// Cell -> equilibration region. Absent puts every cell in region 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eqlnum: Option<Vec<usize>>,
    pub pvt: Vec<PvtDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pvtnum: Option<Vec<usize>>,
    pub saturation: Vec<SatRegionDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satnum: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mixing: Vec<MixingDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity_mps2: Option<f64>,
    #[serde(default)]
    pub formulation: FormulationDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhasesDef {
    #[serde(default)]
    pub water: bool,
    #[serde(default = "default_true")]
    pub oil: bool,
    #[serde(default)]
    pub gas: bool,
}

impl Default for PhasesDef {
    fn default() -> Self {
        Self {
            water: true,
            oil: true,
            gas: false,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum GridDef {
    /// Explicit cell-centre depths.
    Depths { depths_m: Vec<f64> },
    /// Stacked uniform columns, cells numbered column by column.
    Columns { columns: Vec<ColumnDef> },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnDef {
    pub top_m: f64,
    pub cell_thickness_m: f64,
    pub cells: usize,
}

impl GridDef {
    pub fn num_cells(&self) -> usize {
        match self {
            GridDef::Depths { depths_m } => depths_m.len(),
            GridDef::Columns { columns } => columns.iter().map(|c| c.cells).sum(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EquilDef {
    pub datum_depth_m: f64,
    pub datum_pressure_pa: f64,
    /// Defaults to the datum depth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub woc_depth_m: Option<f64>,
    #[serde(default)]
    pub pcow_woc_pa: f64,
    /// Defaults to the datum depth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goc_depth_m: Option<f64>,
    #[serde(default)]
    pub pcgo_goc_pa: f64,
}

impl EquilDef {
    pub fn woc(&self) -> f64 {
        self.woc_depth_m.unwrap_or(self.datum_depth_m)
    }

    pub fn goc(&self) -> f64 {
        self.goc_depth_m.unwrap_or(self.datum_depth_m)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum PvtDef {
    Incompressible {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        water_kg_m3: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        oil_kg_m3: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gas_kg_m3: Option<f64>,
    },
    Compressible {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        water: Option<CompressiblePhaseDef>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        oil: Option<CompressiblePhaseDef>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gas: Option<CompressiblePhaseDef>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompressiblePhaseDef {
    pub ref_density_kg_m3: f64,
    #[serde(default)]
    pub compressibility_per_pa: f64,
    pub ref_pressure_pa: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SatRegionDef {
    #[serde(default)]
    pub water_oil: PcCurveDef,
    #[serde(default)]
    pub gas_oil: PcCurveDef,
    #[serde(default)]
    pub swmin: f64,
    #[serde(default = "default_one")]
    pub swmax: f64,
    #[serde(default)]
    pub sgmin: f64,
    #[serde(default = "default_one")]
    pub sgmax: f64,
}

fn default_one() -> f64 {
    1.0
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum PcCurveDef {
    #[default]
    Zero,
    Table {
        saturations: Vec<f64>,
        pressures_pa: Vec<f64>,
    },
    BrooksCorey {
        entry_pressure_pa: f64,
        lambda: f64,
        s_min: f64,
        s_max: f64,
        pc_max_pa: f64,
        #[serde(default)]
        argument: SaturationArgumentDef,
    },
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SaturationArgumentDef {
    #[default]
    Wetting,
    NonWetting,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MixingDef {
    /// Equilibration region the policies apply to.
    pub region: usize,
    #[serde(default)]
    pub dissolution: MiscibilityDef,
    #[serde(default)]
    pub evaporation: MiscibilityDef,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum MiscibilityDef {
    #[default]
    None,
    Constant {
        ratio: f64,
    },
    DepthTable {
        depths_m: Vec<f64>,
        ratios: Vec<f64>,
    },
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum FormulationDef {
    Wetting,
    #[default]
    NonWetting,
    Global,
}
