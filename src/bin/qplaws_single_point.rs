use qplaws::prelude::*;
use qplaws::StrError;
use russell_lab::Matrix;
use russell_tensor::{Mandel, Tensor2};
use serde::Deserialize;
use std::fs;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "qplaws_single_point",
    about = "Drives a single quadrature point with a constant velocity gradient"
)]
struct Options {
    /// JSON file with the solver configuration and the law parameters
    param_file: String,

    /// Number of time steps
    #[structopt(long, default_value = "10")]
    steps: usize,

    /// Time step
    #[structopt(long, default_value = "1e-6")]
    dt: f64,

    /// Velocity gradient components L00,L01,L02,L10,L11,L12,L20,L21,L22
    #[structopt(long, use_delimiter = true, allow_hyphen_values = true, default_value = "0,1,0,1,0,0,0,0,0")]
    ll: Vec<f64>,
}

/// Holds the contents of the parameters file
#[derive(Deserialize)]
struct Input {
    /// Solver configuration (defaults are used for missing keys)
    #[serde(default)]
    config: Config,

    /// Law parameters
    law: ParamLaw,
}

fn main() -> Result<(), StrError> {
    // logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // parse options
    let options = Options::from_args();
    if options.ll.len() != 9 {
        return Err("the velocity gradient must have 9 components");
    }
    if options.dt <= 0.0 {
        return Err("the time step must be > 0.0");
    }

    // load parameters
    let contents = fs::read_to_string(&options.param_file).map_err(|_| "cannot read the parameters file")?;
    let input: Input = serde_json::from_str(&contents).map_err(|_| "cannot parse the parameters file")?;
    if let Some(msg) = input.config.validate() {
        println!("ERROR: {}", msg);
        return Err("the configuration is invalid");
    }

    // single-point dispatcher
    let law = Law::new(&input.config, &input.law)?;
    let mut dispatcher = LawDispatcher::new(1);
    dispatcher.add_law(law, 0..1).map_err(|_| "cannot add the law")?;
    let mut inputs = QpFields::from_set(&dispatcher.required_inputs(), 1);

    // constant inputs
    let mut mat = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            mat[i][j] = options.ll[3 * i + j];
        }
    }
    let ll = Tensor2::from_matrix(&mat, Mandel::General)?;
    if let Some(field) = inputs.get_mut(Q::L) {
        field.set(&ll, 0).map_err(|_| "cannot set the velocity gradient")?;
    }
    if let Some(field) = inputs.get_mut(Q::TimeStep) {
        field.set_scalar(options.dt, 0).map_err(|_| "cannot set the time step")?;
    }

    // run
    println!("{}", input.config);
    for step in 1..=options.steps {
        if let Err(e) = dispatcher.evaluate_all(&inputs) {
            println!("ERROR at step {}: {}", step, e);
            return Err("the evaluation failed");
        }
        dispatcher.update_all(&inputs).map_err(|_| "cannot commit the state")?;

        // feed the stress back
        let sigma = dispatcher.get(Q::Sigma).map_err(|_| "the law has no stress output")?;
        let sigma = sigma.clone();
        if let Some(field) = inputs.get_mut(Q::Sigma) {
            field.copy_from(&sigma).map_err(|_| "cannot copy the stress")?;
        }

        // results
        let tt = sigma.get(0).map_err(|_| "cannot read the stress")?;
        let mut sig = [[0.0; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                sig[i][j] = tt.get(i, j);
            }
        }
        println!("step = {}, t = {:?}", step, (step as f64) * options.dt);
        println!("σ =\n{:.6}", Matrix::from(&sig));
        let law = dispatcher.law(0).map_err(|_| "cannot access the law")?;
        for q in [Q::Lambda, Q::E, Q::Rho] {
            if let Ok(field) = law.actual.internal_var(q) {
                let value = field.get_scalar(0).map_err(|_| "cannot read the internal variable")?;
                println!("{} = {:?}", q, value);
            }
        }
        println!();
    }
    Ok(())
}
