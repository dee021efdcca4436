///
/// Kalman+Sim the linear Kalman filter simulation.
/// Copyright (c) 2020 Michael Stevens
///
/// A one dimensional moving object, its state being position and velocity, is driven by a noisy control input
/// and observed by a noisy sensor. A discrete linear Kalman filter recursively estimates the true state from the
/// measurements. The simulation records, for every time step, the real, measured and estimated value of each state
/// component so the behaviour of the filter can be plotted and compared with the raw measurements.
///
/// The simulation is built from a few small parts:
/// Shape checked linear algebra over nalgebra matrices, a seedable normal noise generator, the physical process model,
/// the covariance form Kalman filter with its predict and update operations, and the simulation driver producing the
/// output table. Dimensions are dynamic; any consistent state and observation dimension can be simulated.
//
/// # Licensing
///
/// All Kalman+Sim source code files are copyright with the license conditions as given here. The copyright notice is that of the MIT license.
///  This in no way restricts any commercial use you may wish to make using our source code.
///  As long as you respect the copyright and license conditions, Michael Stevens is happy to for you to use it in any way you wish.
///
/// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction,
/// including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software,
/// and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
///
/// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
///
/// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
/// FITNESS FOR A PARTICULAR PURPOSE AND NON INFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY,
/// WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

pub mod error;
pub mod linalg;
pub mod noise;
pub mod models;
pub mod estimators;
pub mod process;
pub mod parameters;
pub mod simulation;
mod matrix;

pub use error::{EstimateError, Result};
pub use estimators::covariance::KalmanFilter;
pub use parameters::ModelParameters;
pub use simulation::{Category, OutputTable, Row, Sample, Simulation};
